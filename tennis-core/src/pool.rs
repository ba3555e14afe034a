//! Equipment pool - scarce shared footwear and rackets
//!
//! Footwear is kept in insertion order and handed out first-fit by size.
//! Rackets are kept sorted by ascending power; equal powers keep their
//! insertion order, so the lowest racket is always well defined.

use std::cmp::Ordering;

use crate::competitor::Competitor;
use crate::footwear::Footwear;
use crate::racket::Racket;

/// Racket plus the sequence number it was added with
#[derive(Clone, Debug)]
struct PooledRacket {
    seq: u64,
    power: f64,
    racket: Racket,
}

impl PooledRacket {
    fn order(&self, other: &Self) -> Ordering {
        self.power
            .total_cmp(&other.power)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Footwear and rackets available to one tournament
#[derive(Clone, Debug, Default)]
pub struct EquipmentPool {
    footwear: Vec<Footwear>,
    rackets: Vec<PooledRacket>,
    next_seq: u64,
}

impl EquipmentPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_footwear(&mut self, item: Footwear) {
        self.footwear.push(item);
    }

    pub fn add_racket(&mut self, item: Racket) {
        let entry = PooledRacket {
            seq: self.next_seq,
            power: item.power(),
            racket: item,
        };
        self.next_seq += 1;
        let at = self
            .rackets
            .partition_point(|r| r.order(&entry) == Ordering::Less);
        self.rackets.insert(at, entry);
    }

    pub fn footwear_count(&self) -> usize {
        self.footwear.len()
    }

    pub fn racket_count(&self) -> usize {
        self.rackets.len()
    }

    pub fn footwear(&self) -> &[Footwear] {
        &self.footwear
    }

    /// Rackets in hand-out order
    pub fn rackets(&self) -> impl Iterator<Item = &Racket> {
        self.rackets.iter().map(|r| &r.racket)
    }

    pub fn peek_lowest_racket(&self) -> Option<&Racket> {
        self.rackets.first().map(|r| &r.racket)
    }

    /// Give every competitor the lowest racket left, in slice order.
    ///
    /// Returns `false` without touching anything when there are fewer
    /// rackets than competitors.
    #[must_use]
    pub fn assign_rackets(&mut self, competitors: &mut [Competitor]) -> bool {
        let needed = competitors.len();
        if self.rackets.len() < needed {
            return false;
        }
        for (competitor, entry) in competitors.iter_mut().zip(self.rackets.drain(..needed)) {
            competitor.equip_racket(entry.racket);
        }
        true
    }

    /// First pool pair, by insertion order, whose size equals the
    /// competitor's shoe size. The pair leaves the pool.
    pub fn match_footwear(&mut self, competitor: &mut Competitor) -> bool {
        match self.footwear.iter().position(|f| f.fits(competitor.shoe_size)) {
            Some(idx) => {
                let pair = self.footwear.remove(idx);
                competitor.equip_footwear(pair);
                true
            }
            None => false,
        }
    }

    /// Remove and return the lowest-power racket, if any remain
    pub fn take_lowest_racket(&mut self) -> Option<Racket> {
        if self.rackets.is_empty() {
            None
        } else {
            Some(self.rackets.remove(0).racket)
        }
    }

    pub fn clear(&mut self) {
        self.footwear.clear();
        self.rackets.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::CompetitorKind;
    use crate::racket::Stringing;

    fn player(name: &str, shoe: f64) -> Competitor {
        Competitor::new(name, 50.0, 50.0, 1, "X", shoe, CompetitorKind::Rusher)
    }

    fn control(model: &str, length: u32) -> Racket {
        Racket::control_frame(model, 300, length, 650, Stringing::Closed)
    }

    #[test]
    fn test_rackets_sorted_by_power() {
        let mut pool = EquipmentPool::new();
        pool.add_racket(control("740", 740));
        pool.add_racket(control("680", 680));
        pool.add_racket(control("700", 700));

        let models: Vec<_> = pool.rackets().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["680", "700", "740"]);
    }

    #[test]
    fn test_equal_power_keeps_insertion_order() {
        let mut pool = EquipmentPool::new();
        pool.add_racket(control("first", 690));
        pool.add_racket(control("low", 680));
        pool.add_racket(control("second", 690));
        pool.add_racket(control("third", 690));

        assert_eq!(pool.take_lowest_racket().unwrap().model, "low");
        assert_eq!(pool.take_lowest_racket().unwrap().model, "first");
        assert_eq!(pool.take_lowest_racket().unwrap().model, "second");
        assert_eq!(pool.take_lowest_racket().unwrap().model, "third");
        assert!(pool.take_lowest_racket().is_none());
    }

    #[test]
    fn test_assign_rackets_success() {
        let mut pool = EquipmentPool::new();
        pool.add_racket(control("b", 690));
        pool.add_racket(control("a", 680));
        pool.add_racket(control("c", 700));
        let mut players = vec![player("p1", 40.0), player("p2", 41.0)];

        assert!(pool.assign_rackets(&mut players));
        assert_eq!(pool.racket_count(), 1);
        assert_eq!(players[0].racket().unwrap().model, "a");
        assert_eq!(players[1].racket().unwrap().model, "b");
        assert_eq!(pool.peek_lowest_racket().unwrap().model, "c");
    }

    #[test]
    fn test_assign_rackets_shortage_mutates_nothing() {
        let mut pool = EquipmentPool::new();
        pool.add_racket(control("only", 680));
        let mut players = vec![player("p1", 40.0), player("p2", 41.0)];

        assert!(!pool.assign_rackets(&mut players));
        assert_eq!(pool.racket_count(), 1);
        assert!(players.iter().all(|p| p.racket().is_none()));
    }

    #[test]
    fn test_match_footwear_first_fit() {
        let mut pool = EquipmentPool::new();
        pool.add_footwear(Footwear::grippy("too small", 39.0, 9.0));
        pool.add_footwear(Footwear::cushioned("first 42", 42.0, 1.0));
        pool.add_footwear(Footwear::grippy("second 42", 42.0, 9.0));

        let mut a = player("a", 42.0);
        let mut b = player("b", 42.0);
        let mut c = player("c", 42.0);
        assert!(pool.match_footwear(&mut a));
        assert!(pool.match_footwear(&mut b));
        assert!(!pool.match_footwear(&mut c));

        assert_eq!(a.footwear().unwrap().model, "first 42");
        assert_eq!(b.footwear().unwrap().model, "second 42");
        assert!(c.footwear().is_none());
        assert_eq!(pool.footwear_count(), 1);
    }

    #[test]
    fn test_unmatched_competitor_keeps_own_pair() {
        let mut pool = EquipmentPool::new();
        pool.add_footwear(Footwear::grippy("pool", 40.0, 5.0));
        let mut c = player("c", 43.0).with_footwear(Footwear::cushioned("own", 43.0, 3.5));

        assert!(!pool.match_footwear(&mut c));
        assert_eq!(c.footwear().unwrap().model, "own");
        assert_eq!(pool.footwear_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut pool = EquipmentPool::new();
        pool.add_footwear(Footwear::grippy("pool", 40.0, 5.0));
        pool.add_racket(control("r", 680));
        pool.clear();
        assert_eq!(pool.footwear_count(), 0);
        assert_eq!(pool.racket_count(), 0);
    }
}
