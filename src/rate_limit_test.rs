use super::*;

fn limiter(per_user: usize, global: usize) -> RateLimiter {
    RateLimiter::new(RateLimitConfig { per_user_limit: per_user, global_limit: global, window: Duration::from_secs(60) })
}

#[test]
fn per_user_allows_up_to_limit() {
    let rl = limiter(3, 100);
    let user = Uuid::new_v4();
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.check_and_record_at(user, now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(user, now),
        Err(RateLimitError::PerUserExceeded { limit: 3, window_secs: 60 })
    ));
}

#[test]
fn global_allows_up_to_limit() {
    let rl = limiter(100, 4);
    let now = Instant::now();

    for i in 0..4 {
        assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(Uuid::new_v4(), now),
        Err(RateLimitError::GlobalExceeded { limit: 4, .. })
    ));
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = limiter(2, 100);
    let user = Uuid::new_v4();
    let start = Instant::now();

    rl.check_and_record_at(user, start).unwrap();
    rl.check_and_record_at(user, start).unwrap();
    assert!(rl.check_and_record_at(user, start).is_err());

    let after_window = start + Duration::from_secs(60) + Duration::from_millis(1);
    assert!(rl.check_and_record_at(user, after_window).is_ok());
}

#[test]
fn rejected_requests_are_not_recorded() {
    let rl = limiter(1, 100);
    let user = Uuid::new_v4();
    let start = Instant::now();

    rl.check_and_record_at(user, start).unwrap();
    for s in 1..30 {
        assert!(rl.check_and_record_at(user, start + Duration::from_secs(s)).is_err());
    }
    assert!(
        rl.check_and_record_at(user, start + Duration::from_secs(61))
            .is_ok()
    );
}

#[test]
fn distinct_users_do_not_interfere() {
    let rl = limiter(1, 100);
    let now = Instant::now();
    let a = Uuid::new_v4();

    rl.check_and_record_at(a, now).unwrap();
    assert!(rl.check_and_record_at(a, now).is_err());
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
}

#[test]
fn defaults_match_constants() {
    let cfg = RateLimitConfig::default();
    assert_eq!(cfg.per_user_limit, 10);
    assert_eq!(cfg.global_limit, 30);
    assert_eq!(cfg.window, Duration::from_secs(60));
}

#[test]
fn idle_users_are_forgotten() {
    let rl = limiter(5, 100);
    let start = Instant::now();

    for _ in 0..20 {
        rl.check_and_record_at(Uuid::new_v4(), start).unwrap();
    }
    assert_eq!(rl.tracked_users(), 20);

    let later = start + Duration::from_secs(61);
    let active = Uuid::new_v4();
    rl.check_and_record_at(active, later).unwrap();
    assert_eq!(rl.tracked_users(), 1);
}

#[test]
fn rejected_request_does_not_leave_an_entry() {
    let rl = limiter(5, 1);
    let now = Instant::now();
    rl.check_and_record_at(Uuid::new_v4(), now).unwrap();
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_err());
    assert_eq!(rl.tracked_users(), 1);
}
