/// Identity and ownership
///
/// # Modules
///
/// - [`middleware`]: resolves the acting user from the `X-User-ID` header
/// - [`authorization`]: ownership checks along the Task → Column → Board → User chain
///
/// Credentials are verified upstream; this crate only trusts the header and
/// confirms the named user exists.

pub mod middleware;
pub mod authorization;
