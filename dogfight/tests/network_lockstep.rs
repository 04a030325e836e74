mod support;

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use dogfight::domain::{
    Action, Arena, Canvas, Cell, Color, InputSource, Key, KeyPress, PlaneModel, PlayerId,
};
use dogfight::interface_adapters::{NetworkInput, Seat, Transport};
use dogfight::use_cases::{GameState, Recruit, TickClock, provision_players};

const CALL_TIMEOUT: Duration = Duration::from_secs(2);
const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(5);

struct NullCanvas;

impl Canvas for NullCanvas {
    fn put(&mut self, _cell: Cell, _glyph: char, _color: Option<Color>) {}
}

async fn join(addr: SocketAddr, client_id: &str, recruit: Recruit) -> (NetworkInput, Vec<Seat>, PlayerId) {
    let transport = Transport::connect(&addr.ip().to_string(), addr.port(), CALL_TIMEOUT)
        .await
        .expect("connect to relay");
    NetworkInput::connect(transport, client_id.to_string(), &recruit, BOOTSTRAP_TIMEOUT)
        .await
        .expect("paired")
}

async fn pair(addr: SocketAddr) -> ((NetworkInput, Vec<Seat>, PlayerId), (NetworkInput, Vec<Seat>, PlayerId)) {
    // b2 connects first; slots must still follow client id order.
    tokio::join!(
        join(addr, "b2", Recruit::new("Hans", PlaneModel::Bf109)),
        join(addr, "a1", Recruit::new("Ace", PlaneModel::P51)),
    )
}

#[tokio::test]
async fn when_two_clients_pair_then_both_agree_on_seats() {
    let addr = support::spawn_relay();

    let ((mut b2, seats_b, slot_b), (mut a1, seats_a, slot_a)) = pair(addr).await;

    assert_eq!(seats_a, seats_b);
    assert_eq!(slot_a, 1);
    assert_eq!(slot_b, 2);
    assert_eq!(seats_a[0].recruit, Recruit::new("Ace", PlaneModel::P51));
    assert_eq!(seats_a[1].recruit, Recruit::new("Hans", PlaneModel::Bf109));

    tokio::join!(a1.close(), b2.close());
}

#[tokio::test]
async fn when_both_clients_exchange_keys_then_every_tick_matches() {
    let addr = support::spawn_relay();
    let ((mut b2, _, _), (mut a1, _, _)) = pair(addr).await;

    let ticks = [
        (Some(Key::Space), None),
        (None, Some(Key::Down)),
        (Some(Key::Up), Some(Key::Char('x'))),
    ];
    let expected = [
        vec![KeyPress::new(1, Some(Action::Shoot)), KeyPress::idle(2)],
        vec![KeyPress::idle(1), KeyPress::new(2, Some(Action::Up))],
        vec![KeyPress::new(1, Some(Action::Down)), KeyPress::idle(2)],
    ];

    for ((key_a, key_b), want) in ticks.into_iter().zip(expected) {
        let (seen_a, seen_b) = tokio::join!(a1.exchange(key_a), b2.exchange(key_b));

        assert_eq!(seen_a.expect("a1 tick"), want);
        assert_eq!(seen_b.expect("b2 tick"), want);
    }

    tokio::join!(a1.close(), b2.close());
}

#[tokio::test]
async fn when_both_sides_simulate_the_same_presses_then_their_games_stay_identical() {
    let addr = support::spawn_relay();
    let ((mut b2, seats_b, _), (mut a1, seats_a, _)) = pair(addr).await;

    let arena = Arena::new(0, 0, 20, 80).expect("valid arena");
    let recruits = |seats: Vec<Seat>| seats.into_iter().map(|s| s.recruit).collect::<Vec<_>>();
    let mut game_a = GameState::new(arena, provision_players(&arena, &recruits(seats_a)));
    let mut game_b = GameState::new(arena, provision_players(&arena, &recruits(seats_b)));

    // Each client keeps its own clock; only the tick count is shared.
    let frame = Duration::from_millis(30);
    let clock_a = TickClock::new(Instant::now(), frame);
    let clock_b = TickClock::new(Instant::now() + Duration::from_millis(11), frame);
    for tick in 0..20u64 {
        let key_a = (tick % 3 == 0).then_some(Key::Space);
        let key_b = (tick % 4 == 1).then_some(Key::Up);
        let (seen_a, seen_b) = tokio::join!(a1.exchange(key_a), b2.exchange(key_b));
        let (now_a, now_b) = (clock_a.at(game_a.tick), clock_b.at(game_b.tick));
        game_a.next_frame(&seen_a.expect("a1 tick"), now_a, &mut NullCanvas);
        game_b.next_frame(&seen_b.expect("b2 tick"), now_b, &mut NullCanvas);
    }

    assert_eq!(game_a.tick, game_b.tick);
    assert_eq!(game_a.cannons.len(), game_b.cannons.len());
    for (plane_a, plane_b) in game_a.players.iter().zip(&game_b.players) {
        assert_eq!(plane_a.plane.body, plane_b.plane.body);
        assert_eq!(plane_a.plane.hull_integrity, plane_b.plane.hull_integrity);
    }
    assert_eq!(game_a.summary(), game_b.summary());

    tokio::join!(a1.close(), b2.close());
}
