/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::macros::gated_call;
use crate::rest::parsers::{required_attr, required_child};
use crate::rest::{Client, MethodCall, Params, PendingCall, Permission, Token, XmlElement};

/// The `flickr.test.*` methods
#[derive(Debug, Clone, Copy)]
pub struct TestApi<'a> {
    client: &'a Client,
}

/// User returned by `flickr.test.login`
#[derive(Debug, Clone, PartialEq)]
pub struct LoginUser {
    pub id: String,
    pub user_name: String,
}

impl LoginUser {
    pub fn from_xml(user: &XmlElement) -> Result<Self, FlickrError> {
        Ok(Self {
            id: required_attr(user, "id")?.to_string(),
            user_name: required_child(user, "username")?.text.clone(),
        })
    }
}

fn echoed(rsp: &XmlElement) -> Result<Vec<(String, String)>, FlickrError> {
    Ok(rsp
        .children
        .iter()
        .map(|c| (c.name.clone(), c.text.clone()))
        .collect())
}

impl<'a> TestApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Echoes back the parameters sent, as name/value pairs
    pub fn echo(&self, params: Params) -> Result<PendingCall<Vec<(String, String)>>, FlickrError> {
        gated_call!(
            self.client,
            Permission::None,
            MethodCall::get("flickr.test.echo", params),
            echoed
        )
    }

    /// Continuation flavour of [`TestApi::echo`]
    pub fn echo_with<S, F>(&self, params: Params, on_success: S, on_failure: F) -> Result<Token, FlickrError>
    where
        S: FnOnce(Token, Vec<(String, String)>) + Send + 'static,
        F: FnOnce(Token, FlickrError) + Send + 'static,
    {
        self.client.api_client().dispatch_with(
            MethodCall::get("flickr.test.echo", params),
            echoed,
            on_success,
            on_failure,
        )
    }

    /// Returns the user the credentials belong to
    pub fn login(&self) -> Result<PendingCall<LoginUser>, FlickrError> {
        gated_call!(
            self.client,
            Permission::Read,
            MethodCall::get("flickr.test.login", Params::new()).authenticated(),
            |rsp: &XmlElement| LoginUser::from_xml(required_child(rsp, "user")?)
        )
    }

    /// Authenticated no-op, useful for checking that signing works
    pub fn null(&self) -> Result<PendingCall<()>, FlickrError> {
        gated_call!(
            self.client,
            Permission::Read,
            MethodCall::get("flickr.test.null", Params::new()).authenticated(),
            |_: &XmlElement| Ok(())
        )
    }
}
