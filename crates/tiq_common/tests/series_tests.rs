//! Tests for the daily trend and hourly throughput builders.

use chrono::{DateTime, Utc};
use tiq_common::clock;
use tiq_common::series::{daily_trend, hourly_throughput, THROUGHPUT_HOURS};
use tiq_common::ticket::Ticket;

fn fixed_now() -> DateTime<Utc> {
    clock::parse_created("2024-05-02T12:00:00").unwrap()
}

fn ticket_created(stamp: &str) -> Ticket {
    Ticket {
        created: Some(stamp.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_daily_trend_groups_and_sorts_ascending() {
    let tickets = vec![
        ticket_created("2024-05-02 08:00:00"),
        ticket_created("2024-04-30 10:00:00"),
        ticket_created("2024-05-02 09:30:00"),
        ticket_created("2024-05-01 23:59:59"),
    ];
    let trend = daily_trend(&tickets, fixed_now());

    let days: Vec<&str> = trend.iter().map(|p| p.day.as_str()).collect();
    assert_eq!(days, vec!["2024-04-30", "2024-05-01", "2024-05-02"]);
    let counts: Vec<u64> = trend.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![1, 1, 2]);
}

#[test]
fn test_daily_trend_moving_average_column() {
    let tickets = vec![
        ticket_created("2024-04-29 01:00:00"),
        ticket_created("2024-04-30 01:00:00"),
        ticket_created("2024-04-30 02:00:00"),
        ticket_created("2024-05-01 01:00:00"),
        ticket_created("2024-05-01 02:00:00"),
        ticket_created("2024-05-01 03:00:00"),
    ];
    let trend = daily_trend(&tickets, fixed_now());
    let ma: Vec<f64> = trend.iter().map(|p| p.ma).collect();
    // counts 1,2,3 under a 3-day window
    assert_eq!(ma, vec![1.0, 1.5, 2.0]);
}

#[test]
fn test_daily_trend_without_parsable_dates_emits_today_zero() {
    let tickets = vec![ticket_created("garbage"), Ticket::default()];
    let trend = daily_trend(&tickets, fixed_now());
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].day, "2024-05-02");
    assert_eq!(trend[0].count, 0);
    assert_eq!(trend[0].ma, 0.0);
}

#[test]
fn test_throughput_has_exactly_24_buckets() {
    let series = hourly_throughput(&[], fixed_now(), THROUGHPUT_HOURS);
    assert_eq!(series.len(), 24);
    assert!(series.iter().all(|p| p.count == 0));
    // window ends at the current hour
    assert_eq!(series.last().unwrap().hour, "12");
    // and starts 23 hours earlier
    assert_eq!(series[0].hour, "13");
}

#[test]
fn test_throughput_counts_land_in_their_hour() {
    let tickets = vec![
        ticket_created("2024-05-02 11:05:00"),
        ticket_created("2024-05-02 11:59:59"),
        ticket_created("2024-05-02T12:00:00"),
    ];
    let series = hourly_throughput(&tickets, fixed_now(), THROUGHPUT_HOURS);
    assert_eq!(series[22].hour, "11");
    assert_eq!(series[22].count, 2);
    assert_eq!(series[23].count, 1);
}

#[test]
fn test_throughput_drops_out_of_window_and_unparsable() {
    let tickets = vec![
        // one hour before the window opens
        ticket_created("2024-05-01 12:59:00"),
        // the future is not in the window either
        ticket_created("2024-05-02 13:00:00"),
        ticket_created("not a date"),
    ];
    let series = hourly_throughput(&tickets, fixed_now(), THROUGHPUT_HOURS);
    assert!(series.iter().all(|p| p.count == 0));
}

#[test]
fn test_throughput_moving_average_window() {
    let mut tickets = Vec::new();
    // 4 tickets in the newest bucket only
    for _ in 0..4 {
        tickets.push(ticket_created("2024-05-02 12:00:00"));
    }
    let series = hourly_throughput(&tickets, fixed_now(), THROUGHPUT_HOURS);
    let last = series.last().unwrap();
    assert_eq!(last.count, 4);
    // 4-bucket trailing window: (0 + 0 + 0 + 4) / 4
    assert_eq!(last.ma, 1.0);
}

#[test]
fn test_throughput_window_straddles_midnight() {
    let now = clock::parse_created("2024-05-02T01:00:00").unwrap();
    let yesterday_late = ticket_created("2024-05-01 23:30:00");
    let series = hourly_throughput(&[yesterday_late], now, THROUGHPUT_HOURS);
    let bucket = series.iter().find(|p| p.count == 1).unwrap();
    assert_eq!(bucket.hour, "23");
}
