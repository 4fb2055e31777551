//! Order tracking steps and the order status view.
//!
//! Each `TrackingStep` moves through a small state machine:
//!
//! ```text
//! pending ──► active ──► completed
//!    │           │
//!    └───────────┴──────► cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. `OrderStatusView` holds a
//! working copy of an order's steps; cancellation rewrites that copy and
//! never the order itself.

use chrono::NaiveDate;
use tracing::{info, warn};

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    order::{Milestone, Order, StepStatus, TrackingStep},
};

// ── Transition table ─────────────────────────────────────────────────────────

/// Whether a single step may move from `from` to `to`.
pub fn can_transition(from: StepStatus, to: StepStatus) -> bool {
    use StepStatus::*;
    matches!(
        (from, to),
        (Pending, Active) | (Pending, Cancelled) | (Active, Completed) | (Active, Cancelled)
    )
}

/// Move `step` to `to`, or `Err(IllegalTransition)` leaving it untouched.
pub fn transition(step: &mut TrackingStep, to: StepStatus) -> MedicallResult<()> {
    if !can_transition(step.status, to) {
        return Err(MedicallError::IllegalTransition {
            step: step.name,
            from: step.status,
            to,
        });
    }
    step.status = to;
    Ok(())
}

/// The steps every new order starts with: "Order Placed" completed and
/// "Order Confirmed" active (both dated `today`), the rest pending.
pub fn initial_tracking_steps(today: NaiveDate) -> Vec<TrackingStep> {
    Milestone::SEQUENCE
        .iter()
        .enumerate()
        .map(|(index, &name)| match index {
            0 => TrackingStep::new(name, StepStatus::Completed, Some(today)),
            1 => TrackingStep::new(name, StepStatus::Active, Some(today)),
            _ => TrackingStep::pending(name),
        })
        .collect()
}

// ── Order status view ────────────────────────────────────────────────────────

/// View-model for a displayed order.
///
/// `steps` starts as a copy of the order's steps and is reset every time an
/// order is shown, so a cancellation seen in one showing does not carry into
/// the next.
#[derive(Debug, Clone)]
pub struct OrderStatusView {
    order: Order,
    steps: Vec<TrackingStep>,
}

impl OrderStatusView {
    pub fn new(order: Order) -> Self {
        let steps = order.tracking_steps.clone();
        Self { order, steps }
    }

    /// Present `order`, discarding any local modifications.
    pub fn show(&mut self, order: Order) {
        self.steps = order.tracking_steps.clone();
        self.order = order;
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The steps as currently displayed.
    pub fn tracking_steps(&self) -> &[TrackingStep] {
        &self.steps
    }

    pub fn total_items(&self) -> u64 {
        self.order.total_items()
    }

    pub fn total_price(&self) -> rust_decimal::Decimal {
        self.order.total_price()
    }

    /// True when a "Cancelled" step is active.
    pub fn is_cancelled(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.name == Milestone::Cancelled && s.status == StepStatus::Active)
    }

    /// False once the order is delivered or already cancelled.
    pub fn can_cancel_order(&self) -> bool {
        let delivered = self
            .steps
            .iter()
            .any(|s| s.name == Milestone::Delivered && s.status == StepStatus::Completed);
        !delivered && !self.is_cancelled()
    }

    /// Cancel the displayed order.
    ///
    /// Every pending or active step becomes cancelled (stamped with `today`
    /// if it has no date), and a "Cancelled" step is appended as active, or
    /// an existing pending one activated. Every status change goes through
    /// the transition table, so an existing "Cancelled" step that is already
    /// terminal is `IllegalTransition`. The change is applied to a working
    /// copy that replaces `steps` only if every transition succeeds.
    pub fn cancel_order(&mut self, today: NaiveDate) -> MedicallResult<()> {
        if !self.can_cancel_order() {
            let reason = if self.is_cancelled() {
                "order is already cancelled"
            } else {
                "order has already been delivered"
            };
            warn!(order_id = %self.order.order_id, reason, "cancellation refused");
            return Err(MedicallError::CancellationNotAllowed {
                reason: reason.to_string(),
            });
        }

        let mut working = self.steps.clone();

        for step in working.iter_mut().filter(|s| s.name != Milestone::Cancelled) {
            if matches!(step.status, StepStatus::Pending | StepStatus::Active) {
                transition(step, StepStatus::Cancelled)?;
                step.date.get_or_insert(today);
            }
        }

        match working.iter_mut().find(|s| s.name == Milestone::Cancelled) {
            Some(existing) => {
                transition(existing, StepStatus::Active)?;
                existing.date = Some(today);
            }
            None => working.push(TrackingStep::new(Milestone::Cancelled, StepStatus::Active, Some(today))),
        }

        self.steps = working;
        info!(order_id = %self.order.order_id, "order cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use medicall_contracts::{
        cart::CartLineItem,
        error::MedicallError,
        order::{Milestone, Order, OrderId, StepStatus, TrackingStep},
        product::Product,
    };

    use super::{can_transition, initial_tracking_steps, transition, OrderStatusView};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn order(id: &str) -> Order {
        Order {
            order_id: OrderId(id.to_string()),
            items: vec![
                CartLineItem::new(Product::new("a", "A", "", Decimal::from(10)), 2),
                CartLineItem::new(Product::new("b", "B", "", Decimal::from(5)), 1),
            ],
            current_step: 1,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            estimated_delivery_date: day(6),
            tracking_steps: initial_tracking_steps(day(1)),
        }
    }

    fn count_cancelled_steps(view: &OrderStatusView) -> usize {
        view.tracking_steps()
            .iter()
            .filter(|s| s.name == Milestone::Cancelled)
            .count()
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use StepStatus::*;
        let all = [Pending, Active, Completed, Cancelled];
        let allowed: Vec<_> = all
            .iter()
            .flat_map(|&f| all.iter().map(move |&t| (f, t)))
            .filter(|&(f, t)| can_transition(f, t))
            .collect();

        assert_eq!(
            allowed,
            vec![(Pending, Active), (Pending, Cancelled), (Active, Completed), (Active, Cancelled)]
        );
    }

    #[test]
    fn illegal_transition_leaves_step_unchanged() {
        let mut step = TrackingStep::new(Milestone::Delivered, StepStatus::Completed, Some(day(2)));
        match transition(&mut step, StepStatus::Cancelled) {
            Err(MedicallError::IllegalTransition { step: name, from, to }) => {
                assert_eq!(name, Milestone::Delivered);
                assert_eq!(from, StepStatus::Completed);
                assert_eq!(to, StepStatus::Cancelled);
            }
            other => panic!("expected IllegalTransition, got {:?}", other),
        }
        assert_eq!(step.status, StepStatus::Completed);
    }

    #[test]
    fn cancel_marks_open_steps_and_appends_cancelled() {
        let mut view = OrderStatusView::new(order("MEDICALL-1"));
        assert!(view.can_cancel_order());

        view.cancel_order(day(3)).unwrap();

        let steps = view.tracking_steps();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(steps[0].date, Some(day(1)));
        // Active step keeps its own date.
        assert_eq!(steps[1].status, StepStatus::Cancelled);
        assert_eq!(steps[1].date, Some(day(1)));
        // Pending steps are stamped with the cancellation date.
        for step in &steps[2..6] {
            assert_eq!(step.status, StepStatus::Cancelled);
            assert_eq!(step.date, Some(day(3)));
        }
        assert_eq!(steps[6].name, Milestone::Cancelled);
        assert_eq!(steps[6].status, StepStatus::Active);
        assert_eq!(steps[6].date, Some(day(3)));

        assert!(view.is_cancelled());
        assert!(!view.can_cancel_order());
    }

    #[test]
    fn cancel_does_not_touch_the_order() {
        let original = order("MEDICALL-2");
        let mut view = OrderStatusView::new(original.clone());

        view.cancel_order(day(3)).unwrap();

        assert_eq!(view.order(), &original);
        assert_eq!(view.order().current_step, 1);
        assert_eq!(view.total_items(), 3);
        assert_eq!(view.total_price(), Decimal::from(25));
    }

    #[test]
    fn second_cancel_is_refused_without_changes() {
        let mut view = OrderStatusView::new(order("MEDICALL-3"));
        view.cancel_order(day(3)).unwrap();
        let after_first = view.tracking_steps().to_vec();

        match view.cancel_order(day(4)) {
            Err(MedicallError::CancellationNotAllowed { reason }) => {
                assert!(reason.contains("already cancelled"))
            }
            other => panic!("expected CancellationNotAllowed, got {:?}", other),
        }

        assert_eq!(view.tracking_steps(), after_first.as_slice());
        assert_eq!(count_cancelled_steps(&view), 1);
        assert_eq!(view.total_price(), Decimal::from(25));
    }

    #[test]
    fn delivered_order_cannot_be_cancelled() {
        let mut delivered = order("MEDICALL-4");
        for step in delivered.tracking_steps.iter_mut() {
            step.status = StepStatus::Completed;
            step.date = Some(day(5));
        }
        let mut view = OrderStatusView::new(delivered);

        assert!(!view.can_cancel_order());
        match view.cancel_order(day(6)) {
            Err(MedicallError::CancellationNotAllowed { reason }) => assert!(reason.contains("delivered")),
            other => panic!("expected CancellationNotAllowed, got {:?}", other),
        }
        assert_eq!(count_cancelled_steps(&view), 0);
    }

    #[test]
    fn existing_inactive_cancelled_step_is_reused() {
        let mut with_placeholder = order("MEDICALL-5");
        with_placeholder
            .tracking_steps
            .push(TrackingStep::pending(Milestone::Cancelled));
        let mut view = OrderStatusView::new(with_placeholder);

        view.cancel_order(day(2)).unwrap();

        assert_eq!(view.tracking_steps().len(), 7);
        assert_eq!(count_cancelled_steps(&view), 1);
        assert!(view.is_cancelled());
    }

    #[test]
    fn terminal_cancelled_step_is_not_reactivated() {
        let mut with_terminal = order("MEDICALL-7");
        with_terminal.tracking_steps.push(TrackingStep::new(
            Milestone::Cancelled,
            StepStatus::Cancelled,
            Some(day(1)),
        ));
        let mut view = OrderStatusView::new(with_terminal.clone());

        match view.cancel_order(day(2)) {
            Err(MedicallError::IllegalTransition { step, from, to }) => {
                assert_eq!(step, Milestone::Cancelled);
                assert_eq!(from, StepStatus::Cancelled);
                assert_eq!(to, StepStatus::Active);
            }
            other => panic!("expected IllegalTransition, got {:?}", other),
        }
        assert_eq!(view.tracking_steps(), with_terminal.tracking_steps.as_slice());
        assert!(!view.is_cancelled());
    }

    #[test]
    fn showing_an_order_resets_local_steps() {
        let first = order("MEDICALL-6");
        let mut view = OrderStatusView::new(first.clone());
        view.cancel_order(day(3)).unwrap();

        // Same order again: local cancellation is discarded.
        view.show(first.clone());
        assert_eq!(view.tracking_steps(), first.tracking_steps.as_slice());
        assert!(view.can_cancel_order());

        // A different order replaces everything.
        let second = order("MEDICALL-7");
        view.cancel_order(day(3)).unwrap();
        view.show(second.clone());
        assert_eq!(view.order().order_id, second.order_id);
        assert_eq!(view.tracking_steps(), second.tracking_steps.as_slice());
    }
}
