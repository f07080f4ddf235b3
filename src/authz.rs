//! Ownership check for course mutation.
//!
//! The requester's wallet address is caller-supplied and unverified; the only
//! rule is exact, case-sensitive equality with the stored owner.

use crate::models::CourseOwner;

pub fn is_course_owner(course: &CourseOwner, requester_wallet: Option<&str>) -> bool {
    match (course.owner_wallet_address.as_deref(), requester_wallet) {
        (Some(owner), Some(requester)) => owner == requester,
        _ => false,
    }
}
