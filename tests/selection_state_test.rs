// ==========================================
// ClaimSelectionState 集成测试
// ==========================================
// 测试范围:
// 1. 状态机: Unset → DateOnly → Complete
// 2. 非法选择: 窗口外日期、边界外时间，失败不改变状态
// 3. 重置幂等、换日期清除无效时间、取件变化清空选择
// ==========================================


use laundry_claim::{BookingType, ClaimSelectionState, PickupContext, SchedulingError, SelectionPhase, ShopSchedule};
use test_helpers::{date, moment, time};

/// 周一 10:00 加急 → 周一 [14:00, 17:00]、周二 [06:00, 17:00]
fn monday_rush_state() -> ClaimSelectionState {
    laundry_claim::logging::init_test();
    let mut state = ClaimSelectionState::new(ShopSchedule::default());
    state.recompute_for_new_pickup(PickupContext::new(moment(2026, 10, 19, 10, 0), BookingType::Rush));
    state
}

#[test]
fn test_状态机_完整流程() {
    let mut state = monday_rush_state();
    assert_eq!(state.phase(), SelectionPhase::Unset);

    state.select_date(date(2026, 10, 20)).unwrap();
    assert_eq!(state.phase(), SelectionPhase::DateOnly);

    state.select_time(time(9, 0)).unwrap();
    assert_eq!(state.phase(), SelectionPhase::Complete);
    assert_eq!(state.selected_moment(), Some(moment(2026, 10, 20, 9, 0)));

    let summary = state.summary().unwrap();
    assert_eq!(summary.booking_type, BookingType::Rush);
    assert_eq!(summary.claim_date, date(2026, 10, 20));
    assert_eq!(summary.readiness_moment, moment(2026, 10, 19, 14, 0));
}

#[test]
fn test_窗口外日期_无效选择() {
    let mut state = monday_rush_state();
    let err = state.select_date(date(2026, 10, 21)).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSelection { .. }));
    assert_eq!(state.phase(), SelectionPhase::Unset);
}

#[test]
fn test_开门前时间_无效选择且不改变状态() {
    let mut state = monday_rush_state();
    state.select_date(date(2026, 10, 20)).unwrap();
    state.select_time(time(8, 0)).unwrap();

    let err = state.select_time(time(5, 0)).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSelection { .. }));
    assert_eq!(state.selected_time(), Some(time(8, 0)));
    assert_eq!(state.phase(), SelectionPhase::Complete);
}

#[test]
fn test_未选日期先选时间_无效选择() {
    let mut state = monday_rush_state();
    assert!(state.select_time(time(10, 0)).is_err());
    assert_eq!(state.phase(), SelectionPhase::Unset);
}

#[test]
fn test_无窗口时选择日期_无效选择() {
    let mut state = ClaimSelectionState::new(ShopSchedule::default());
    let err = state.select_date(date(2026, 10, 20)).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSelection { .. }));
}

#[test]
fn test_重置幂等() {
    let mut state = monday_rush_state();
    state.select_date(date(2026, 10, 20)).unwrap();
    state.select_time(time(10, 0)).unwrap();

    state.reset();
    let once = (state.phase(), state.selected_date(), state.selected_time());
    state.reset();
    let twice = (state.phase(), state.selected_date(), state.selected_time());

    assert_eq!(once, twice);
    assert_eq!(once, (SelectionPhase::Unset, None, None));
    // 窗口保留
    assert!(state.window().is_some());
}

#[test]
fn test_换日期_时间超出新边界则清除() {
    let mut state = monday_rush_state();
    state.select_date(date(2026, 10, 20)).unwrap();
    state.select_time(time(9, 0)).unwrap();

    // 周一下限 14:00，09:00 无效
    state.select_date(date(2026, 10, 19)).unwrap();
    assert_eq!(state.selected_time(), None);
    assert_eq!(state.phase(), SelectionPhase::DateOnly);
}

#[test]
fn test_换日期_时间仍有效则保留() {
    let mut state = monday_rush_state();
    state.select_date(date(2026, 10, 19)).unwrap();
    state.select_time(time(15, 0)).unwrap();

    state.select_date(date(2026, 10, 20)).unwrap();
    assert_eq!(state.selected_time(), Some(time(15, 0)));
    assert_eq!(state.phase(), SelectionPhase::Complete);
}

#[test]
fn test_取件变化_清空选择并替换窗口() {
    let mut state = monday_rush_state();
    state.select_date(date(2026, 10, 20)).unwrap();
    state.select_time(time(10, 0)).unwrap();

    let window = state.recompute_for_new_pickup(PickupContext::new(
        moment(2026, 10, 19, 10, 0),
        BookingType::Normal,
    ));
    // 周一 10:00 + 60h = 周三 22:00 → 周四起
    assert_eq!(
        window.allowed_date_list(),
        vec![date(2026, 10, 22), date(2026, 10, 23), date(2026, 10, 24)]
    );
    assert_eq!(state.phase(), SelectionPhase::Unset);
    assert!(state.select_date(date(2026, 10, 20)).is_err());
}
