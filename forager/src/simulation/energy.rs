/// Swarm energy budget. Plain bookkeeping: no floor, no ceiling.
///
/// Arithmetic saturates at the `i64` limits instead of overflowing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnergyLedger {
    energy: i64,
}

impl EnergyLedger {
    pub fn energy(&self) -> i64 {
        self.energy
    }

    /// Called once per completed delivery.
    pub fn credit(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(i64::from(amount));
    }

    /// Called once per tick, after every agent has been processed.
    pub fn debit_for_activity(&mut self, active_count: u32, per_agent_cost: u32) {
        let cost = i64::from(active_count).saturating_mul(i64::from(per_agent_cost));
        self.energy = self.energy.saturating_sub(cost);
    }

    pub fn reset(&mut self) {
        self.energy = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut ledger = EnergyLedger::default();
        ledger.credit(100);
        ledger.debit_for_activity(3, 2);
        assert_eq!(ledger.energy(), 94);
    }

    #[test]
    fn test_energy_goes_negative() {
        let mut ledger = EnergyLedger::default();
        for _ in 0..10 {
            ledger.debit_for_activity(4, 1);
        }
        assert_eq!(ledger.energy(), -40);

        ledger.reset();
        assert_eq!(ledger.energy(), 0);
    }

    #[test]
    fn test_no_active_agents_costs_nothing() {
        let mut ledger = EnergyLedger::default();
        ledger.debit_for_activity(0, 50);
        assert_eq!(ledger.energy(), 0);
    }

    #[test]
    fn test_extreme_costs_saturate() {
        let mut ledger = EnergyLedger::default();
        for _ in 0..4 {
            ledger.debit_for_activity(u32::MAX, u32::MAX);
        }
        assert_eq!(ledger.energy(), i64::MIN);

        ledger.reset();
        ledger.energy = i64::MAX - 1;
        ledger.credit(u32::MAX);
        assert_eq!(ledger.energy(), i64::MAX);
    }
}
