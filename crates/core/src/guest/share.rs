/// Path prefix of the public thank-you page.
pub const THANK_YOU_PATH: &str = "/thank-you";

/// Builds the personalized thank-you link handed to a guest.
///
/// ```
/// use guestbook_core::guest::thank_you_link;
///
/// assert_eq!(
///     thank_you_link("https://party.example/", "lx1abc"),
///     "https://party.example/thank-you/lx1abc"
/// );
/// ```
pub fn thank_you_link(site_url: &str, guest_id: &str) -> String {
    format!(
        "{}{THANK_YOU_PATH}/{}",
        site_url.trim_end_matches('/'),
        urlencoding::encode(guest_id)
    )
}
