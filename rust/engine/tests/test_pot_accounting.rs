use felt_engine::pot::compute_pots;
use felt_engine::seat::{SeatSnapshot, SeatStatus};

fn seat(seat: usize, player: u64, total_bet: u32, status: SeatStatus) -> SeatSnapshot {
    SeatSnapshot {
        player,
        seat,
        stack: 1_000,
        status,
        round_bet: 0,
        total_bet,
        has_acted: true,
        timeouts: 0,
    }
}

#[test]
fn short_all_in_splits_into_main_and_side_pot() {
    // 100 all-in against two 300 stacks: a 300 main pot everyone can win and
    // a 400 side pot only the full contributors can win.
    let seats = vec![
        seat(0, 10, 100, SeatStatus::AllIn),
        seat(1, 11, 300, SeatStatus::Active),
        seat(2, 12, 300, SeatStatus::Active),
    ];
    let pots = compute_pots(&seats);
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, 300);
    assert_eq!(pots[0].eligible, vec![10, 11, 12]);
    assert_eq!(pots[1].amount, 400);
    assert_eq!(pots[1].eligible, vec![11, 12]);
}

#[test]
fn equal_contributions_make_a_single_pot() {
    let seats = vec![
        seat(0, 10, 200, SeatStatus::Active),
        seat(1, 11, 200, SeatStatus::Active),
    ];
    let pots = compute_pots(&seats);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 400);
    assert_eq!(pots[0].eligible, vec![10, 11]);
}

#[test]
fn folded_chips_stay_in_but_the_folder_is_never_eligible() {
    let seats = vec![
        seat(0, 10, 60, SeatStatus::Folded),
        seat(1, 11, 150, SeatStatus::AllIn),
        seat(2, 12, 300, SeatStatus::Active),
    ];
    let pots = compute_pots(&seats);
    // 60 of folded money lands in the first pot, nothing past the fold point.
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, 60 + 150 + 150);
    assert_eq!(pots[0].eligible, vec![11, 12]);
    assert_eq!(pots[1].amount, 150);
    assert_eq!(pots[1].eligible, vec![12]);
    let total: u32 = pots.iter().map(|p| p.amount).sum();
    assert_eq!(total, 60 + 150 + 300);
}

#[test]
fn stacked_all_ins_build_one_pot_per_level() {
    let seats = vec![
        seat(0, 10, 50, SeatStatus::AllIn),
        seat(1, 11, 120, SeatStatus::AllIn),
        seat(2, 12, 400, SeatStatus::AllIn),
        seat(3, 13, 400, SeatStatus::Active),
    ];
    let pots = compute_pots(&seats);
    assert_eq!(pots.len(), 3);
    assert_eq!(pots[0].amount, 200); // 50 from each of four seats
    assert_eq!(pots[0].eligible, vec![10, 11, 12, 13]);
    assert_eq!(pots[1].amount, 210); // 70 from each of three seats
    assert_eq!(pots[1].eligible, vec![11, 12, 13]);
    assert_eq!(pots[2].amount, 560); // 280 from each of two seats
    assert_eq!(pots[2].eligible, vec![12, 13]);
    let total: u32 = pots.iter().map(|p| p.amount).sum();
    assert_eq!(total, 50 + 120 + 400 + 400);
}

#[test]
fn pot_amounts_always_sum_to_total_contributions() {
    let histories = vec![
        vec![
            seat(0, 1, 5, SeatStatus::Folded),
            seat(1, 2, 10, SeatStatus::Folded),
            seat(2, 3, 10, SeatStatus::Active),
        ],
        vec![
            seat(0, 1, 75, SeatStatus::AllIn),
            seat(1, 2, 75, SeatStatus::AllIn),
            seat(2, 3, 30, SeatStatus::Folded),
            seat(3, 4, 75, SeatStatus::Active),
        ],
        vec![
            seat(0, 1, 1, SeatStatus::AllIn),
            seat(1, 2, 2, SeatStatus::AllIn),
            seat(2, 3, 3, SeatStatus::AllIn),
            seat(3, 4, 4, SeatStatus::AllIn),
        ],
    ];
    for seats in histories {
        let expected: u32 = seats.iter().map(|s| s.total_bet).sum();
        let pots = compute_pots(&seats);
        let total: u32 = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, expected, "conservation failed for {:?}", seats);
    }
}

#[test]
fn no_contributions_means_no_pots() {
    assert!(compute_pots(&[]).is_empty());
    let seats = vec![seat(0, 10, 0, SeatStatus::Active)];
    assert!(compute_pots(&seats).is_empty());
}

#[test]
fn non_participants_never_enter_the_pot() {
    let seats = vec![
        seat(0, 10, 100, SeatStatus::Active),
        seat(1, 11, 100, SeatStatus::Active),
        seat(2, 12, 0, SeatStatus::NonParticipant),
    ];
    let pots = compute_pots(&seats);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].eligible, vec![10, 11]);
}
