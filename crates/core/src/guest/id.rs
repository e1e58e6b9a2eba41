use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of random base36 characters appended after the time component.
pub const RANDOM_SUFFIX_LEN: usize = 10;

/// Generates a guest id: the creation time in base36 milliseconds followed by
/// [`RANDOM_SUFFIX_LEN`] random base36 characters.
///
/// Good enough to avoid collisions at single-process creation rates. Not a
/// secret: anyone holding the link can view the guest.
pub fn generate_guest_id(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0) as u64;
    let mut id = to_base36(millis);

    let mut rng = rand::rng();
    for _ in 0..RANDOM_SUFFIX_LEN {
        id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
    }
    id
}

/// Formats a number in lowercase base36.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
