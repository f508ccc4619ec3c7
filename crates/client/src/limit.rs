//! Per-endpoint rate-limit tracking.
//!
//! The service signals limits in one of two shapes per response: a quota
//! window (`Requests-Remaining` / `Requests-Limit` / `Requests-Reset`) or a
//! flat cooldown (`Cooldown-Reset`). A response carries exactly one
//! meaningful view, and the shape can flip between responses as the endpoint
//! enters or leaves cooldown. The limiter stores the latest view per
//! endpoint and tells the pipeline whether the request that produced a
//! response must wait before resending.

use std::sync::Mutex;

use crate::endpoint::Endpoint;
use crate::transport::Headers;

pub const HEADER_COOLDOWN_RESET: &str = "Cooldown-Reset";
pub const HEADER_REQUESTS_REMAINING: &str = "Requests-Remaining";
pub const HEADER_REQUESTS_LIMIT: &str = "Requests-Limit";
pub const HEADER_REQUESTS_RESET: &str = "Requests-Reset";

/// Latest rate-limit view for one endpoint.
///
/// A sum type so "quota window" and "on cooldown" can never be stored at
/// the same time; each response replaces the previous view outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitState {
    /// The endpoint has a live quota window.
    Active {
        /// Requests left in the current window, counting this one.
        remaining: u64,
        /// Window capacity.
        limit: u64,
        /// Seconds until the window resets.
        reset: u64,
    },
    /// The endpoint is blocked outright for `cooldown` seconds.
    OnCooldown { cooldown: u64 },
}

/// Verdict for the request that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    /// Proceed, no wait required.
    AllGreen,
    /// This call spent the quota window; wait out the reset.
    LowResource,
    /// The endpoint is blocked; wait out the cooldown.
    OnCooldown,
}

/// Decision returned to the pipeline: verdict plus seconds to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitDecision {
    pub status: LimitStatus,
    pub wait_secs: u64,
}

impl LimitDecision {
    const ALL_GREEN: LimitDecision = LimitDecision {
        status: LimitStatus::AllGreen,
        wait_secs: 0,
    };

    /// True when the pipeline must sleep and resend.
    pub fn must_wait(self) -> bool {
        !matches!(self.status, LimitStatus::AllGreen)
    }
}

impl RateLimitState {
    /// Parse whichever limit view a response carries.
    ///
    /// Cooldown takes precedence: while an endpoint is mid-cooldown the
    /// quota fields are stale and must not be reconciled with it. Returns
    /// `None` when neither view is present (or its values are malformed).
    fn from_headers(headers: &Headers) -> Option<Self> {
        if let Some(cooldown) = headers.get_u64(HEADER_COOLDOWN_RESET) {
            return Some(RateLimitState::OnCooldown { cooldown });
        }
        let remaining = headers.get_u64(HEADER_REQUESTS_REMAINING)?;
        let limit = headers.get_u64(HEADER_REQUESTS_LIMIT)?;
        let reset = headers.get_u64(HEADER_REQUESTS_RESET)?;
        Some(RateLimitState::Active {
            remaining,
            limit,
            reset,
        })
    }

    fn decision(self) -> LimitDecision {
        match self {
            RateLimitState::OnCooldown { cooldown } => LimitDecision {
                status: LimitStatus::OnCooldown,
                wait_secs: cooldown,
            },
            // `remaining` still counts the request that produced this
            // response, so at 1 the window is spent once this call lands.
            RateLimitState::Active {
                remaining, reset, ..
            } if remaining <= 1 => LimitDecision {
                status: LimitStatus::LowResource,
                wait_secs: reset,
            },
            RateLimitState::Active { .. } => LimitDecision::ALL_GREEN,
        }
    }
}

/// Tracks the latest rate-limit state for every endpoint.
///
/// Each endpoint has its own lock so in-flight requests to different
/// endpoints never contend, and one consume is a single critical section:
/// parse, store, decide. Locks are never held across an await. When two
/// requests to the same endpoint race, whichever response is consumed last
/// wins the stored state; each request still gets the decision computed
/// from its own response.
#[derive(Debug)]
pub struct Limiter {
    buckets: [Mutex<Option<RateLimitState>>; Endpoint::COUNT],
}

impl Limiter {
    pub fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| Mutex::new(None)),
        }
    }

    /// Interpret one response's headers for `endpoint`.
    ///
    /// Stores the freshly parsed state (replacing the previous view, never
    /// merging) before returning the decision. Responses with no
    /// recognizable limit headers leave the stored state untouched and
    /// never block a request.
    pub fn consume_headers(&self, endpoint: Endpoint, headers: &Headers) -> LimitDecision {
        let mut bucket = self.lock(endpoint);
        match RateLimitState::from_headers(headers) {
            Some(state) => {
                *bucket = Some(state);
                state.decision()
            }
            None => LimitDecision::ALL_GREEN,
        }
    }

    /// Latest stored view for `endpoint`, if any response has carried one.
    pub fn state(&self, endpoint: Endpoint) -> Option<RateLimitState> {
        *self.lock(endpoint)
    }

    fn lock(&self, endpoint: Endpoint) -> std::sync::MutexGuard<'_, Option<RateLimitState>> {
        // A poisoned bucket only ever holds a fully written state; keep going.
        self.buckets[endpoint.index()]
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_cooldown_view() {
        let limiter = Limiter::new();
        let decision = limiter.consume_headers(
            Endpoint::SetPixel,
            &headers(&[(HEADER_COOLDOWN_RESET, "30")]),
        );
        assert_eq!(decision.status, LimitStatus::OnCooldown);
        assert_eq!(decision.wait_secs, 30);
        assert_eq!(
            limiter.state(Endpoint::SetPixel),
            Some(RateLimitState::OnCooldown { cooldown: 30 })
        );
    }

    #[test]
    fn test_cooldown_takes_precedence_over_quota() {
        let limiter = Limiter::new();
        let decision = limiter.consume_headers(
            Endpoint::SetPixel,
            &headers(&[
                (HEADER_COOLDOWN_RESET, "12"),
                (HEADER_REQUESTS_REMAINING, "40"),
                (HEADER_REQUESTS_LIMIT, "60"),
                (HEADER_REQUESTS_RESET, "100"),
            ]),
        );
        assert_eq!(decision.status, LimitStatus::OnCooldown);
        assert_eq!(decision.wait_secs, 12);
        assert_eq!(
            limiter.state(Endpoint::SetPixel),
            Some(RateLimitState::OnCooldown { cooldown: 12 })
        );
    }

    #[test]
    fn test_quota_all_green() {
        let limiter = Limiter::new();
        let decision = limiter.consume_headers(
            Endpoint::GetPixel,
            &headers(&[
                (HEADER_REQUESTS_REMAINING, "40"),
                (HEADER_REQUESTS_LIMIT, "60"),
                (HEADER_REQUESTS_RESET, "100"),
            ]),
        );
        assert_eq!(decision.status, LimitStatus::AllGreen);
        assert_eq!(decision.wait_secs, 0);
    }

    #[test]
    fn test_quota_low_resource() {
        // Both 0 and 1 remaining mean the window is spent after this call.
        for remaining in ["0", "1"] {
            let limiter = Limiter::new();
            let decision = limiter.consume_headers(
                Endpoint::GetPixel,
                &headers(&[
                    (HEADER_REQUESTS_REMAINING, remaining),
                    (HEADER_REQUESTS_LIMIT, "60"),
                    (HEADER_REQUESTS_RESET, "45"),
                ]),
            );
            assert_eq!(decision.status, LimitStatus::LowResource);
            assert_eq!(decision.wait_secs, 45);
        }
    }

    #[test]
    fn test_incomplete_quota_is_ignored() {
        let limiter = Limiter::new();
        let decision = limiter.consume_headers(
            Endpoint::GetSize,
            &headers(&[(HEADER_REQUESTS_REMAINING, "3")]),
        );
        assert_eq!(decision.status, LimitStatus::AllGreen);
        assert_eq!(limiter.state(Endpoint::GetSize), None);
    }

    #[test]
    fn test_missing_headers_never_block() {
        let limiter = Limiter::new();
        let decision = limiter.consume_headers(Endpoint::GetSize, &Headers::new());
        assert_eq!(decision.status, LimitStatus::AllGreen);
        assert_eq!(decision.wait_secs, 0);
        assert_eq!(limiter.state(Endpoint::GetSize), None);
    }

    #[test]
    fn test_state_replaced_not_merged() {
        let limiter = Limiter::new();
        limiter.consume_headers(
            Endpoint::GetPixels,
            &headers(&[
                (HEADER_REQUESTS_REMAINING, "9"),
                (HEADER_REQUESTS_LIMIT, "10"),
                (HEADER_REQUESTS_RESET, "60"),
            ]),
        );
        limiter.consume_headers(
            Endpoint::GetPixels,
            &headers(&[(HEADER_COOLDOWN_RESET, "5")]),
        );
        assert_eq!(
            limiter.state(Endpoint::GetPixels),
            Some(RateLimitState::OnCooldown { cooldown: 5 })
        );

        // Missing headers keep the last stored view.
        limiter.consume_headers(Endpoint::GetPixels, &Headers::new());
        assert_eq!(
            limiter.state(Endpoint::GetPixels),
            Some(RateLimitState::OnCooldown { cooldown: 5 })
        );
    }

    #[test]
    fn test_buckets_are_independent() {
        let limiter = Limiter::new();
        limiter.consume_headers(
            Endpoint::SetPixel,
            &headers(&[(HEADER_COOLDOWN_RESET, "120")]),
        );
        limiter.consume_headers(
            Endpoint::GetSize,
            &headers(&[
                (HEADER_REQUESTS_REMAINING, "7"),
                (HEADER_REQUESTS_LIMIT, "8"),
                (HEADER_REQUESTS_RESET, "9"),
            ]),
        );
        assert_eq!(
            limiter.state(Endpoint::SetPixel),
            Some(RateLimitState::OnCooldown { cooldown: 120 })
        );
        assert_eq!(
            limiter.state(Endpoint::GetSize),
            Some(RateLimitState::Active {
                remaining: 7,
                limit: 8,
                reset: 9
            })
        );
        assert_eq!(limiter.state(Endpoint::GetPixel), None);
    }
}
