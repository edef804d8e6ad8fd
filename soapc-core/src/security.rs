//! # Security Extension Point
//!
//! A [`Security`] implementation contributes authentication material to every request sent by
//! a [`SoapClient`](crate::client::SoapClient). The client never interprets what it adds.
//!
//! Each capability has a no-op default, so an implementation only overrides what it needs:
//!
//! * [`Security::add_headers`]: mutate the outgoing transport headers.
//! * [`Security::add_options`]: mutate the transport options of the request.
//! * [`Security::to_xml`]: markup placed inside `<soap:Header>`.
//!
//! At most one extension is active per client. Setting a new one replaces the previous one
//! entirely.
use crate::soap::transport::TransportOptions;
use http::HeaderMap;

pub trait Security: Send + Sync {
    fn add_headers(&self, _headers: &mut HeaderMap) {}

    fn add_options(&self, _options: &mut TransportOptions) {}

    fn to_xml(&self) -> String {
        String::new()
    }
}
