//! Fixed-range price ladder: one [`PriceLevel`] per tick between `min_price` and
//! `max_price`, plus an ordered set of occupied ticks per side so best-bid/ask
//! lookup is a single `BTreeSet` query instead of a scan.

use std::collections::BTreeSet;

use crate::level::PriceLevel;
use crate::order::{PriceTick, Side};
use crate::TICK_SIZE;

/// A price ladder spanning `[min_price, max_price]` in steps of [`TICK_SIZE`].
pub struct PriceLadder {
    levels: Vec<PriceLevel>,
    active_bids: BTreeSet<usize>,
    active_asks: BTreeSet<usize>,
    min_price: f64,
    num_levels: usize,
}

impl PriceLadder {
    pub fn new(min_price: f64, max_price: f64) -> Self {
        let num_levels = (((max_price - min_price) / TICK_SIZE).round() as usize) + 1;
        let levels = (0..num_levels).map(|_| PriceLevel::new()).collect();
        Self {
            levels,
            active_bids: BTreeSet::new(),
            active_asks: BTreeSet::new(),
            min_price,
            num_levels,
        }
    }

    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Snaps an external price to the nearest tick index, clamping to the
    /// ladder's range. Returns whether the raw price fell outside the range
    /// before clamping.
    pub fn price_to_index(&self, price: f64) -> (PriceTick, bool) {
        let normalized = (price - self.min_price) / TICK_SIZE;
        let rounded = normalized.round();
        if rounded < 0.0 {
            (0, true)
        } else if rounded >= self.num_levels as f64 {
            ((self.num_levels - 1) as PriceTick, true)
        } else {
            (rounded as PriceTick, false)
        }
    }

    pub fn index_to_price(&self, index: PriceTick) -> f64 {
        self.min_price + f64::from(index) * TICK_SIZE
    }

    pub fn level(&self, index: PriceTick) -> &PriceLevel {
        &self.levels[index as usize]
    }

    pub fn level_mut(&mut self, index: PriceTick) -> &mut PriceLevel {
        &mut self.levels[index as usize]
    }

    pub fn mark_active(&mut self, side: Side, index: PriceTick) {
        self.active_set_mut(side).insert(index as usize);
    }

    pub fn mark_inactive(&mut self, side: Side, index: PriceTick) {
        self.active_set_mut(side).remove(&(index as usize));
    }

    fn active_set_mut(&mut self, side: Side) -> &mut BTreeSet<usize> {
        match side {
            Side::Buy => &mut self.active_bids,
            Side::Sell => &mut self.active_asks,
        }
    }

    /// Highest occupied bid tick, if any.
    pub fn best_bid_index(&self) -> Option<PriceTick> {
        self.active_bids.iter().next_back().map(|&i| i as PriceTick)
    }

    /// Lowest occupied ask tick, if any.
    pub fn best_ask_index(&self) -> Option<PriceTick> {
        self.active_asks.iter().next().map(|&i| i as PriceTick)
    }
}
