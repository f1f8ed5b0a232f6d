//! Integration tests for the work order domain.
//!
//! These tests drive the aggregate, lifecycle engine, and cost ledger
//! together through full order lifecycles, the way the orchestrator does.

use chrono::Utc;
use common::UserId;
use domain::{
    BlockCategory, ConfirmationKind, CostLedger, DomainError, Hours, LifecycleEngine, Money,
    OrderKind, OrderStatus, Priority, Transition, VarianceStatus, WorkOrder,
};

fn planner() -> UserId {
    UserId::new("planner")
}

/// A general order with one staffed operation and one component, estimated
/// and ready to plan.
fn staffed_order() -> WorkOrder {
    let mut order = WorkOrder::general(
        "overhaul pump",
        "PUMP-001",
        "PLANT-A/PUMPS",
        Priority::Medium,
        planner(),
        Utc::now(),
    )
    .unwrap();
    let op = order
        .add_operation("replace bearing", Hours::from_hours(2))
        .unwrap();
    order.assign_technician(&op, "tech-42").unwrap();
    order
        .add_component("bearing", None, false, 1, Money::from_dollars(150))
        .unwrap();
    CostLedger::default().estimate(&mut order).unwrap();
    order
}

/// Checks the transition with the engine, then applies it, mirroring the
/// orchestrator's two-step discipline.
fn advance(engine: &LifecycleEngine, order: &mut WorkOrder, transition: Transition) {
    let check = engine.can_transition(
        transition.source(),
        transition.target(),
        &order.snapshot(|_| true),
    );
    assert!(
        check.allowed,
        "transition {transition} blocked: {:?}",
        check.reasons()
    );
    order
        .apply_transition(transition, &planner(), Utc::now())
        .unwrap();
}

mod full_lifecycle {
    use super::*;

    #[test]
    fn general_order_reaches_technical_completion_and_settles() {
        let engine = LifecycleEngine::default();
        let ledger = CostLedger::default();
        let mut order = staffed_order();
        let op = order.operations().next().unwrap().number.clone();
        let component = order.components().next().unwrap().number.clone();

        assert_eq!(order.costs().estimated_total(), Money::from_dollars(250));

        advance(&engine, &mut order, Transition::Plan);
        advance(&engine, &mut order, Transition::Release);

        order
            .post_goods_issue(&component, 1, planner(), Utc::now())
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        ledger.accumulate_actuals(&mut order);

        advance(&engine, &mut order, Transition::Start);
        advance(&engine, &mut order, Transition::Confirm);
        advance(&engine, &mut order, Transition::Complete);

        assert_eq!(order.status(), OrderStatus::Teco);
        assert!(order.is_terminal());
        assert!(order.completed_by().is_some());

        let settlement = ledger
            .settle(&mut order, "CC-1000", planner(), Utc::now())
            .unwrap();
        assert_eq!(
            settlement.document.as_str(),
            format!("SET-{}", order.id().as_str())
        );
        assert_eq!(settlement.amount, Money::from_dollars(250));
    }

    #[test]
    fn variance_tracks_overrun_after_extra_hours() {
        let engine = LifecycleEngine::default();
        let ledger = CostLedger::default();
        let mut order = staffed_order();
        let op = order.operations().next().unwrap().number.clone();
        let component = order.components().next().unwrap().number.clone();

        advance(&engine, &mut order, Transition::Plan);
        advance(&engine, &mut order, Transition::Release);

        order
            .post_goods_issue(&component, 1, planner(), Utc::now())
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                false,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hundredths(60),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        ledger.accumulate_actuals(&mut order);

        assert_eq!(order.costs().actual_total(), Money::from_dollars(280));

        let report = ledger.variance(&order);
        assert_eq!(report.total, Money::from_dollars(30));
        assert_eq!(report.percent.to_string(), "12.00%");
        assert_eq!(report.status, VarianceStatus::ReviewRequired);
        assert!(report.requires_explanation);
    }
}

mod completion_gates {
    use super::*;

    #[test]
    fn teco_blocked_reason_counts_unconfirmed_operations() {
        let engine = LifecycleEngine::default();
        let ledger = CostLedger::default();
        let mut order = staffed_order();
        let op = order.operations().next().unwrap().number.clone();
        let component = order.components().next().unwrap().number.clone();

        advance(&engine, &mut order, Transition::Plan);
        advance(&engine, &mut order, Transition::Release);
        order
            .post_goods_issue(&component, 1, planner(), Utc::now())
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        advance(&engine, &mut order, Transition::Start);
        advance(&engine, &mut order, Transition::Confirm);

        // Late scope growth: two more operations land after confirmation.
        order
            .add_operation("repaint housing", Hours::from_hours(1))
            .unwrap();
        order
            .add_operation("update records", Hours::from_hours(1))
            .unwrap();

        let check = engine.can_transition(
            OrderStatus::Confirmed,
            OrderStatus::Teco,
            &order.snapshot(|_| true),
        );
        assert!(!check.allowed);
        assert!(
            check
                .reasons()
                .iter()
                .any(|r| r == "2 operation(s) not finally confirmed"),
            "reasons: {:?}",
            check.reasons()
        );
    }

    #[test]
    fn breakdown_teco_needs_malfunction_report() {
        let engine = LifecycleEngine::default();
        let mut order = WorkOrder::breakdown(
            "motor seized",
            "MOTOR-7",
            "PLANT-B/DRIVES",
            "NOTIF-991",
            planner(),
            Utc::now(),
        )
        .unwrap();
        let op = order
            .add_operation("swap motor", Hours::from_hours(3))
            .unwrap();
        order.assign_technician(&op, "tech-7").unwrap();
        CostLedger::default().estimate(&mut order).unwrap();

        advance(&engine, &mut order, Transition::Plan);
        advance(&engine, &mut order, Transition::Release);
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(3),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        advance(&engine, &mut order, Transition::Start);
        advance(&engine, &mut order, Transition::Confirm);

        let check = engine.can_transition(
            OrderStatus::Confirmed,
            OrderStatus::Teco,
            &order.snapshot(|_| true),
        );
        assert!(!check.allowed);
        assert!(
            check
                .reasons()
                .iter()
                .any(|r| r == "no malfunction report on file")
        );

        order
            .file_malfunction_report("winding burnt", "overload", planner(), Utc::now())
            .unwrap();
        advance(&engine, &mut order, Transition::Complete);
        assert_eq!(order.status(), OrderStatus::Teco);
    }
}

mod release_gates {
    use super::*;

    fn with_pending_permit_and_critical_part(mut order: WorkOrder) -> WorkOrder {
        let op = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order.assign_technician(&op, "tech-42").unwrap();
        order
            .add_component("bearing", None, true, 1, Money::from_dollars(150))
            .unwrap();
        order.add_permit("hot work").unwrap();
        CostLedger::default().estimate(&mut order).unwrap();
        order
            .apply_transition(Transition::Plan, &planner(), Utc::now())
            .unwrap();
        order
    }

    #[test]
    fn general_release_blocked_by_permit_and_material_together() {
        let engine = LifecycleEngine::default();
        let order = with_pending_permit_and_critical_part(
            WorkOrder::general(
                "overhaul pump",
                "PUMP-001",
                "PLANT-A/PUMPS",
                Priority::Medium,
                planner(),
                Utc::now(),
            )
            .unwrap(),
        );

        // Stock has nothing and no purchase order is placed.
        let check = engine.can_transition(
            OrderStatus::Planned,
            OrderStatus::Released,
            &order.snapshot(|_| false),
        );
        assert!(!check.allowed);
        assert_eq!(check.blockers.len(), 2);
        assert_eq!(check.blockers[0].category, BlockCategory::Permits);
        assert_eq!(check.blockers[1].category, BlockCategory::Materials);
    }

    #[test]
    fn breakdown_release_skips_permit_and_material_gates() {
        let engine = LifecycleEngine::default();
        let order = with_pending_permit_and_critical_part(
            WorkOrder::breakdown(
                "pump seized",
                "PUMP-001",
                "PLANT-A/PUMPS",
                "NOTIF-100",
                planner(),
                Utc::now(),
            )
            .unwrap(),
        );
        assert_eq!(order.kind(), OrderKind::Breakdown);

        let check = engine.can_transition(
            OrderStatus::Planned,
            OrderStatus::Released,
            &order.snapshot(|_| false),
        );
        assert!(check.allowed, "blocked: {:?}", check.reasons());
    }

    #[test]
    fn technician_gate_holds_for_both_kinds() {
        let engine = LifecycleEngine::default();
        for order in [
            WorkOrder::general(
                "overhaul pump",
                "PUMP-001",
                "PLANT-A/PUMPS",
                Priority::Medium,
                planner(),
                Utc::now(),
            )
            .unwrap(),
            WorkOrder::breakdown(
                "pump seized",
                "PUMP-001",
                "PLANT-A/PUMPS",
                "NOTIF-100",
                planner(),
                Utc::now(),
            )
            .unwrap(),
        ] {
            let mut order = order;
            order
                .add_operation("replace bearing", Hours::from_hours(2))
                .unwrap();
            CostLedger::default().estimate(&mut order).unwrap();
            order
                .apply_transition(Transition::Plan, &planner(), Utc::now())
                .unwrap();

            let check = engine.can_transition(
                OrderStatus::Planned,
                OrderStatus::Released,
                &order.snapshot(|_| true),
            );
            assert!(!check.allowed);
            assert_eq!(check.blockers.len(), 1);
            assert_eq!(check.blockers[0].category, BlockCategory::Staffing);
        }
    }
}

mod lifecycle_guards {
    use super::*;

    #[test]
    fn states_cannot_be_skipped() {
        let engine = LifecycleEngine::default();
        let mut order = staffed_order();

        let check = engine.can_transition(
            OrderStatus::Created,
            OrderStatus::Released,
            &order.snapshot(|_| true),
        );
        assert!(!check.allowed);
        assert_eq!(check.reasons().len(), 1);

        let result = order.apply_transition(Transition::Release, &planner(), Utc::now());
        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn teco_is_terminal_for_engine_and_aggregate() {
        let engine = LifecycleEngine::default();
        let ledger = CostLedger::default();
        let mut order = staffed_order();
        let op = order.operations().next().unwrap().number.clone();
        let component = order.components().next().unwrap().number.clone();

        advance(&engine, &mut order, Transition::Plan);
        advance(&engine, &mut order, Transition::Release);
        order
            .post_goods_issue(&component, 1, planner(), Utc::now())
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        ledger.accumulate_actuals(&mut order);
        advance(&engine, &mut order, Transition::Start);
        advance(&engine, &mut order, Transition::Confirm);
        advance(&engine, &mut order, Transition::Complete);

        assert!(engine.valid_next_states(OrderStatus::Teco).is_empty());
        assert!(engine.enabled_actions(OrderStatus::Teco).is_empty());

        let giving_up = order.post_goods_issue(&component, 1, planner(), Utc::now());
        assert!(matches!(giving_up, Err(DomainError::OrderClosed)));
    }
}
