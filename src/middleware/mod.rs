/*
 * Responsibility
 * - Public interface of the middleware layer (re-exports)
 * - http::apply, cors::apply, security_headers::apply
 */
pub mod cors;
pub mod http;
pub mod security_headers;
