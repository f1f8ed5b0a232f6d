use chrono::Utc;
use common::UserId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    ConfirmationKind, CostLedger, Hours, LifecycleEngine, Money, OrderStatus, Priority,
    Transition, WorkOrder,
};

fn populated_order() -> WorkOrder {
    let user = UserId::new("bench");
    let now = Utc::now();
    let mut order = WorkOrder::general(
        "benchmark overhaul",
        "PUMP-001",
        "PLANT-A/PUMPS",
        Priority::Medium,
        user.clone(),
        now,
    )
    .unwrap();

    let mut operations = Vec::new();
    for i in 0..10 {
        let op = order
            .add_operation(format!("operation {i}"), Hours::from_hours(2))
            .unwrap();
        order.assign_technician(&op, "tech-1").unwrap();
        operations.push(op);
    }

    let mut components = Vec::new();
    for i in 0..10 {
        components.push(
            order
                .add_component(format!("component {i}"), None, false, 2, Money::from_dollars(100))
                .unwrap(),
        );
    }

    CostLedger::default().estimate(&mut order).unwrap();
    order.apply_transition(Transition::Plan, &user, now).unwrap();
    order
        .apply_transition(Transition::Release, &user, now)
        .unwrap();

    for number in &components {
        order.post_goods_issue(number, 2, user.clone(), now).unwrap();
    }
    for number in &operations {
        order
            .post_confirmation(
                number,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                true,
                None,
                user.clone(),
                now,
            )
            .unwrap();
    }

    order
}

fn bench_can_transition(c: &mut Criterion) {
    let engine = LifecycleEngine::default();
    let order = populated_order();
    let snapshot = order.snapshot(|_| true);

    c.bench_function("domain/can_transition_release", |b| {
        b.iter(|| engine.can_transition(OrderStatus::Planned, OrderStatus::Released, &snapshot));
    });
}

fn bench_estimate(c: &mut Criterion) {
    let ledger = CostLedger::default();
    let mut order = populated_order();

    c.bench_function("domain/estimate", |b| {
        b.iter(|| ledger.estimate(&mut order).unwrap());
    });
}

fn bench_accumulate_actuals(c: &mut Criterion) {
    let ledger = CostLedger::default();
    let mut order = populated_order();

    c.bench_function("domain/accumulate_actuals", |b| {
        b.iter(|| ledger.accumulate_actuals(&mut order));
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let order = populated_order();

    c.bench_function("domain/snapshot", |b| {
        b.iter(|| order.snapshot(|_| true));
    });
}

criterion_group!(
    benches,
    bench_can_transition,
    bench_estimate,
    bench_accumulate_actuals,
    bench_snapshot,
);
criterion_main!(benches);
