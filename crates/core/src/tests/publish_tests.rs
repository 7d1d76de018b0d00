// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for publishing the report: channel and contact guards, token
//! issue and reissue, send failures, and link expiry.

use crate::{Command, CoreError, HealthCheckState, apply};

use time::{Duration, OffsetDateTime};
use vhc_flow_domain::{DomainError, HealthCheckStatus, SendChannels, TokenValidity};

use super::helpers::{
    add_priced_item, create_test_actor, create_test_cause, sent_state, state_with_status,
};

fn publish_command(email: bool, sms: bool, days: u16, token: &str) -> Command {
    Command::Publish {
        channels: SendChannels::new(email, sms),
        validity: TokenValidity::from_days(days).unwrap(),
        token: token.to_string(),
    }
}

fn ready_state() -> HealthCheckState {
    let mut state = state_with_status(HealthCheckStatus::ReadyToSend);
    add_priced_item(&mut state, 1, "40.00", "60.00");
    state
}

// ============================================================================
// Publish Guard Tests
// ============================================================================

#[test]
fn test_publish_requires_channel() {
    let state = ready_state();

    let result = apply(
        &state,
        publish_command(false, false, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NoSendChannelSelected)
    ));
}

#[test]
fn test_publish_requires_email_on_file() {
    let mut state = ready_state();
    state.health_check.customer_email = None;

    let result = apply(
        &state,
        publish_command(true, false, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingContactInfo { channel }) if channel == "email"
    ));
}

#[test]
fn test_publish_requires_mobile_on_file() {
    let mut state = ready_state();
    state.health_check.customer_mobile = None;

    let result = apply(
        &state,
        publish_command(false, true, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::MissingContactInfo { channel }) if channel == "sms"
    ));
}

#[test]
fn test_publish_rejected_before_ready() {
    let state = state_with_status(HealthCheckStatus::AwaitingPricing);

    let result = apply(
        &state,
        publish_command(true, false, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

// ============================================================================
// Token Issue and Reissue Tests
// ============================================================================

#[test]
fn test_publish_issues_token_and_expiry() {
    let state = ready_state();
    let now = OffsetDateTime::now_utc();

    let result = apply(
        &state,
        publish_command(true, true, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap();

    let check = &result.new_state.health_check;
    assert_eq!(check.status, HealthCheckStatus::Sent);
    assert_eq!(check.public_token.as_deref(), Some("tok-abc"));
    assert_eq!(check.token_expires_at, Some(now + Duration::days(7)));
    assert_eq!(check.sent_at, Some(now));
    assert_eq!(result.timeline_event.action.name, "Publish");
}

#[test]
fn test_resend_replaces_token_and_expiry() {
    let now = OffsetDateTime::now_utc();
    let state = sent_state("tok-old", now);
    let later = now + Duration::days(2);

    let result = apply(
        &state,
        publish_command(true, false, 3, "tok-new"),
        create_test_actor(),
        create_test_cause(),
        later,
    )
    .unwrap();

    let check = &result.new_state.health_check;
    assert_eq!(check.status, HealthCheckStatus::Sent);
    assert_eq!(check.public_token.as_deref(), Some("tok-new"));
    assert_eq!(check.token_expires_at, Some(later + Duration::days(3)));
    assert_eq!(check.sent_at, Some(later));
}

#[test]
fn test_republish_after_expiry() {
    let now = OffsetDateTime::now_utc();
    let mut state = sent_state("tok-old", now);
    state.health_check.status = HealthCheckStatus::Expired;
    let later = now + Duration::days(10);

    let result = apply(
        &state,
        publish_command(true, false, 7, "tok-new"),
        create_test_actor(),
        create_test_cause(),
        later,
    )
    .unwrap();

    let check = &result.new_state.health_check;
    assert_eq!(check.status, HealthCheckStatus::Sent);
    assert_eq!(check.public_token.as_deref(), Some("tok-new"));
}

// ============================================================================
// Send Failure Tests
// ============================================================================

#[test]
fn test_record_unable_to_send_keeps_status() {
    let state = ready_state();

    let result = apply(
        &state,
        Command::RecordUnableToSend {
            reason: String::from("Email bounced"),
        },
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    )
    .unwrap();

    let check = &result.new_state.health_check;
    assert_eq!(check.status, HealthCheckStatus::ReadyToSend);
    assert_eq!(check.unable_to_send_reason.as_deref(), Some("Email bounced"));
}

#[test]
fn test_record_unable_to_send_rejected_after_send() {
    let now = OffsetDateTime::now_utc();
    let state = sent_state("tok-abc", now);

    let result = apply(
        &state,
        Command::RecordUnableToSend {
            reason: String::from("Email bounced"),
        },
        create_test_actor(),
        create_test_cause(),
        now,
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_publish_clears_unable_to_send_reason() {
    let mut state = ready_state();
    state.health_check.unable_to_send_reason = Some(String::from("Email bounced"));

    let result = apply(
        &state,
        publish_command(true, false, 7, "tok-abc"),
        create_test_actor(),
        create_test_cause(),
        OffsetDateTime::now_utc(),
    )
    .unwrap();

    assert!(result.new_state.health_check.unable_to_send_reason.is_none());
}

// ============================================================================
// Link Expiry Tests
// ============================================================================

#[test]
fn test_mark_expired_requires_lapse() {
    let now = OffsetDateTime::now_utc();
    let state = sent_state("tok-abc", now);

    let result = apply(
        &state,
        Command::MarkExpired,
        create_test_actor(),
        create_test_cause(),
        now + Duration::days(1),
    );

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { reason, .. })
            if reason == "the public token has not lapsed"
    ));
}

#[test]
fn test_mark_expired_after_lapse() {
    let now = OffsetDateTime::now_utc();
    let state = sent_state("tok-abc", now);

    let result = apply(
        &state,
        Command::MarkExpired,
        create_test_actor(),
        create_test_cause(),
        now + Duration::days(8),
    )
    .unwrap();

    assert_eq!(
        result.new_state.health_check.status,
        HealthCheckStatus::Expired
    );
}

#[test]
fn test_mark_expired_from_opened() {
    let now = OffsetDateTime::now_utc();
    let mut state = sent_state("tok-abc", now);
    state.health_check.status = HealthCheckStatus::Opened;
    state.health_check.first_opened_at = Some(now + Duration::days(1));

    let result = apply(
        &state,
        Command::MarkExpired,
        create_test_actor(),
        create_test_cause(),
        now + Duration::days(8),
    )
    .unwrap();

    assert_eq!(
        result.new_state.health_check.status,
        HealthCheckStatus::Expired
    );
}

#[test]
fn test_mark_expired_without_issued_token() {
    let now = OffsetDateTime::now_utc();
    let mut state = sent_state("tok-abc", now);
    state.health_check.token_expires_at = None;

    let result = apply(
        &state,
        Command::MarkExpired,
        create_test_actor(),
        create_test_cause(),
        now + Duration::days(30),
    );

    assert!(result.is_err());
}
