//! Keeps the weights of enabled take-profit slots summing to exactly 100.
//!
//! Disabled slots always hold 0. Weights are whole percentages.

use tracing::debug;

use crate::models::TakeProfitSlot;

const FULL: i64 = 100;

pub struct QuantityAllocator;

impl QuantityAllocator {
    /// Flip `enabled` at `index` and split 100 evenly over the enabled slots.
    pub fn toggle(slots: &[TakeProfitSlot], index: usize) -> Vec<TakeProfitSlot> {
        let mut out = slots.to_vec();
        if index >= out.len() {
            debug!("Toggle ignored: slot {} out of range ({} slots)", index, out.len());
            return out;
        }
        out[index].enabled = !out[index].enabled;
        Self::distribute_evenly(&mut out);
        out
    }

    /// Set the weight at `index` and spread the remainder over the other
    /// enabled slots in proportion to their current weights.
    ///
    /// `new_weight` is clamped to [0, 100] and rounded. NaN or a disabled /
    /// out-of-range slot leaves the weights as they are. A lone enabled
    /// slot always stays at 100.
    pub fn edit_weight(slots: &[TakeProfitSlot], index: usize, new_weight: f64) -> Vec<TakeProfitSlot> {
        let mut out = slots.to_vec();
        if new_weight.is_nan() {
            return out;
        }
        match out.get(index) {
            Some(slot) if slot.enabled => {}
            _ => {
                debug!("Weight edit ignored: slot {} is not an enabled slot", index);
                return out;
            }
        }

        let others: Vec<usize> = enabled_indices(&out)
            .into_iter()
            .filter(|&i| i != index)
            .collect();

        if others.is_empty() {
            out[index].weight_percent = FULL as u32;
            zero_disabled(&mut out);
            return out;
        }

        let weight = new_weight.round().clamp(0.0, FULL as f64) as i64;
        let remaining = FULL - weight;
        let others_total: i64 = others.iter().map(|&i| out[i].weight_percent as i64).sum();

        let mut shares: Vec<i64> = others
            .iter()
            .map(|&i| {
                let share = if others_total > 0 {
                    out[i].weight_percent as f64 * remaining as f64 / others_total as f64
                } else {
                    remaining as f64 / others.len() as f64
                };
                share.round() as i64
            })
            .collect();

        // Push the rounding residual onto the first other slot, spilling to
        // the next ones if the clamp to [0, 100] cannot absorb it all.
        let mut residual = remaining - shares.iter().sum::<i64>();
        for share in shares.iter_mut() {
            if residual == 0 {
                break;
            }
            let corrected = (*share + residual).clamp(0, FULL);
            residual -= corrected - *share;
            *share = corrected;
        }

        out[index].weight_percent = weight as u32;
        for (&i, &share) in others.iter().zip(shares.iter()) {
            out[i].weight_percent = share as u32;
        }
        zero_disabled(&mut out);
        out
    }

    /// Re-establish the invariant from scratch with an even split.
    pub fn normalize(slots: &[TakeProfitSlot]) -> Vec<TakeProfitSlot> {
        let mut out = slots.to_vec();
        if Self::is_balanced(&out) {
            return out;
        }
        Self::distribute_evenly(&mut out);
        out
    }

    /// Sum of enabled weights is 100 (or there are none) and disabled
    /// slots carry 0.
    pub fn is_balanced(slots: &[TakeProfitSlot]) -> bool {
        let enabled = slots.iter().filter(|s| s.enabled).count();
        let disabled_clear = slots
            .iter()
            .filter(|s| !s.enabled)
            .all(|s| s.weight_percent == 0);
        let total = Self::enabled_total(slots);
        disabled_clear && if enabled == 0 { total == 0 } else { total == FULL as u32 }
    }

    pub fn enabled_total(slots: &[TakeProfitSlot]) -> u32 {
        slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.weight_percent)
            .sum()
    }

    /// floor(100 / n) each, the remainder handed out one unit at a time to
    /// the first enabled slots.
    fn distribute_evenly(slots: &mut [TakeProfitSlot]) {
        let enabled = enabled_indices(slots);
        zero_disabled(slots);
        if enabled.is_empty() {
            return;
        }
        let n = enabled.len() as u32;
        let base = FULL as u32 / n;
        let remainder = FULL as u32 % n;
        for (rank, &i) in enabled.iter().enumerate() {
            slots[i].weight_percent = base + u32::from((rank as u32) < remainder);
        }
    }
}

fn enabled_indices(slots: &[TakeProfitSlot]) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.enabled)
        .map(|(i, _)| i)
        .collect()
}

fn zero_disabled(slots: &mut [TakeProfitSlot]) {
    for slot in slots.iter_mut().filter(|s| !s.enabled) {
        slot.weight_percent = 0;
    }
}
