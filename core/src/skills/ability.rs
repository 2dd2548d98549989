//! Recast-gated abilities with charges
//!
//! Charges are never ticked by a clock. Every query first runs
//! [`AbilitySkill::recover_charges`], which derives how many full recasts
//! have elapsed since the recharge cycle started and credits them.
//!
//! # Recast clock
//!
//! The recast clock starts when a charge is spent from a full stack and
//! keeps running while further charges are spent. Each recovered charge
//! moves the clock forward by exactly one recast, so a partial interval
//! is always measured from the most recent recovery boundary:
//!
//! ```text
//! recast 60s, 2 charges
//! t=0   use   2 → 1   clock starts at 0
//! t=10  use   1 → 0   clock still at 0
//! t=30  query         30s remaining
//! t=65  query 0 → 1   clock moves to 60
//! ```

use super::{Cooldown, IllegalUse, SkillInfo, UNUSABLE_REASON};

/// Smallest recast an ability can have
pub const MIN_RECAST_SECS: f64 = 0.01;

/// A skill gated by its own recast timer
#[derive(Debug, Clone, PartialEq)]
pub struct AbilitySkill {
    pub info: SkillInfo,

    /// Seconds to recover one charge
    pub recast_time: f64,

    max_charges: u32,
    current_charges: u32,

    /// Start of the running recharge interval, `None` if never used
    recast_start: Option<f64>,
}

impl AbilitySkill {
    /// Recast times that are not positive and finite fall back to
    /// [`MIN_RECAST_SECS`]
    pub fn new(info: SkillInfo, recast_time: f64) -> Self {
        let recast_time = if recast_time.is_finite() && recast_time > 0.0 {
            recast_time
        } else {
            MIN_RECAST_SECS
        };
        Self {
            info,
            recast_time,
            max_charges: 1,
            current_charges: 1,
            recast_start: None,
        }
    }

    /// Set the charge cap; a skill always holds at least one charge
    pub fn with_max_charges(mut self, max_charges: u32) -> Self {
        self.max_charges = max_charges.max(1);
        self.current_charges = self.max_charges;
        self
    }

    pub fn max_charges(&self) -> u32 {
        self.max_charges
    }

    /// Charges as of the last recovery; call [`Self::recover_charges`] first
    /// for an up-to-date count
    pub fn current_charges(&self) -> u32 {
        self.current_charges
    }

    pub fn recast_start(&self) -> Option<f64> {
        self.recast_start
    }

    /// When the next charge comes back, `None` if never used
    pub fn next_charge_time(&self) -> Option<f64> {
        self.recast_start.map(|t| t + self.recast_time)
    }

    /// Credit every full recast elapsed between the recast clock and `current_time`
    pub fn recover_charges(&mut self, current_time: f64) {
        let Some(start) = self.recast_start else {
            return;
        };
        if self.current_charges >= self.max_charges || self.recast_time <= 0.0 {
            return;
        }

        let elapsed = current_time - start;
        let recovered = (elapsed / self.recast_time).floor().max(0.0);
        if recovered < 1.0 {
            return;
        }

        let missing = self.max_charges - self.current_charges;
        self.current_charges = if recovered >= f64::from(missing) {
            self.max_charges
        } else {
            // recovered < missing <= u32::MAX
            self.current_charges + recovered as u32
        };
        self.recast_start = Some(start + recovered * self.recast_time);
    }

    /// Seconds until the next charge at `current_time`, 0 when full
    pub fn remaining_recast_time(&mut self, current_time: f64) -> f64 {
        self.recover_charges(current_time);

        if self.current_charges >= self.max_charges {
            return 0.0;
        }
        match self.next_charge_time() {
            Some(next) => (next - current_time).max(0.0),
            None => 0.0,
        }
    }

    /// `"{current}/{max}"` as of `current_time`
    pub fn charge_status(&mut self, current_time: f64) -> String {
        self.recover_charges(current_time);
        format!("{}/{}", self.current_charges, self.max_charges)
    }
}

impl Cooldown for AbilitySkill {
    fn can_use(&mut self, time: f64) -> bool {
        if !time.is_finite() {
            return false;
        }
        self.recover_charges(time);
        self.current_charges > 0
    }

    fn use_at(&mut self, time: f64) -> Result<(), IllegalUse> {
        self.recover_charges(time);

        if self.current_charges == 0 || !time.is_finite() {
            return Err(IllegalUse {
                skill: self.info.name.clone(),
                attempted_at: time,
                next_available: self.next_charge_time().unwrap_or(time),
            });
        }

        if self.current_charges == self.max_charges {
            self.recast_start = Some(time);
        }
        self.current_charges -= 1;
        Ok(())
    }

    fn reset(&mut self) {
        self.current_charges = self.max_charges;
        self.recast_start = None;
    }

    fn unavailability_reason(&mut self, time: f64) -> String {
        let remaining = self.remaining_recast_time(time);
        if remaining > 0.0 {
            format!("recast remaining {remaining:.2}s")
        } else {
            UNUSABLE_REASON.to_string()
        }
    }
}
