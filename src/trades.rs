//! trades.rs: Trading-journal performance metrics (Profit Pulse).
//!
//! Pure aggregation over imported trades. Rows whose P&L cannot be computed
//! (non-finite) still count toward `total_trades` but are left out of the sums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub asset: String,
    #[serde(default)]
    pub date: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    #[serde(default, rename = "type", alias = "side")]
    pub side: Option<TradeSide>,
    /// Realised P&L when the journal already carries it.
    #[serde(default)]
    pub pnl: Option<f64>,
}

impl TradeRecord {
    /// Explicit `pnl`, else `(exit - entry) * quantity`, negated for shorts.
    pub fn realised_pnl(&self) -> f64 {
        if let Some(p) = self.pnl {
            return p;
        }
        let gross = (self.exit_price - self.entry_price) * self.quantity;
        match self.side {
            Some(TradeSide::Short) => -gross,
            _ => gross,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_profit: f64,
    pub average_profit: f64,
    /// `None` when there were no losing trades.
    pub profit_factor: Option<f64>,
    pub total_win: f64,
    pub total_loss: f64,
    pub analysis_date: DateTime<Utc>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `None` for an empty journal.
pub fn calculate_metrics(trades: &[TradeRecord]) -> Option<TradeMetrics> {
    if trades.is_empty() {
        return None;
    }

    let total_trades = trades.len();
    let mut total_profit = 0.0;
    let mut winning_trades = 0;
    let mut losing_trades = 0;
    let mut total_win = 0.0;
    let mut total_loss = 0.0;

    for pnl in trades.iter().map(TradeRecord::realised_pnl) {
        if !pnl.is_finite() {
            continue;
        }
        total_profit += pnl;
        if pnl > 0.0 {
            winning_trades += 1;
            total_win += pnl;
        } else if pnl < 0.0 {
            losing_trades += 1;
            total_loss += pnl.abs();
        }
    }

    let n = total_trades as f64;
    Some(TradeMetrics {
        total_trades,
        winning_trades,
        losing_trades,
        win_rate: round2(winning_trades as f64 / n * 100.0),
        total_profit: round2(total_profit),
        average_profit: round2(total_profit / n),
        profit_factor: (total_loss > 0.0).then(|| total_win / total_loss),
        total_win: round2(total_win),
        total_loss: round2(total_loss),
        analysis_date: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(entry: f64, exit: f64, qty: f64, side: Option<TradeSide>) -> TradeRecord {
        TradeRecord {
            asset: "EUR/USD".into(),
            date: "2023-10-01".into(),
            entry_price: entry,
            exit_price: exit,
            quantity: qty,
            side,
            pnl: None,
        }
    }

    #[test]
    fn empty_has_no_metrics() {
        assert!(calculate_metrics(&[]).is_none());
    }

    #[test]
    fn shorts_profit_when_price_falls() {
        let t = trade(1.3150, 1.3100, 15_000.0, Some(TradeSide::Short));
        assert!((t.realised_pnl() - 75.0).abs() < 1e-6);
    }

    #[test]
    fn mixed_journal() {
        let mut explicit = trade(0.0, 0.0, 0.0, None);
        explicit.pnl = Some(-50.0);
        let trades = vec![
            trade(100.0, 110.0, 10.0, Some(TradeSide::Long)), // +100
            trade(100.0, 95.0, 10.0, None),                    // -50
            explicit,                                          // -50
            trade(100.0, 100.0, 10.0, None),                   // 0
        ];
        let m = calculate_metrics(&trades).unwrap();
        assert_eq!(m.total_trades, 4);
        assert_eq!(m.winning_trades, 1);
        assert_eq!(m.losing_trades, 2);
        assert_eq!(m.win_rate, 25.0);
        assert_eq!(m.total_profit, 0.0);
        assert_eq!(m.total_win, 100.0);
        assert_eq!(m.total_loss, 100.0);
        assert_eq!(m.profit_factor, Some(1.0));
    }

    #[test]
    fn non_finite_rows_are_skipped_but_counted() {
        let mut broken = trade(1.0, 2.0, 1.0, None);
        broken.pnl = Some(f64::NAN);
        let trades = vec![trade(1.0, 3.0, 1.0, None), broken];
        let m = calculate_metrics(&trades).unwrap();
        assert_eq!(m.total_trades, 2);
        assert_eq!(m.winning_trades, 1);
        assert_eq!(m.average_profit, 1.0);
        assert_eq!(m.profit_factor, None);
    }
}
