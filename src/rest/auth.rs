/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::macros::gated_call;
use crate::rest::parsers::{optional_attr, required_attr, required_child};
use crate::rest::{Client, Creds, MethodCall, Params, PendingCall, Permission, XmlElement};
use std::str::FromStr;

/// The token checking methods of `flickr.auth.*`.
///
/// Obtaining tokens in the first place is left to the consumer of this library.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a Client,
}

/// What the service reports about the token in use
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCheck {
    pub token: String,
    pub permission: Permission,
    pub user_id: String,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
}

impl TokenCheck {
    /// Builds from either the `<oauth>` or the legacy `<auth>` element
    pub fn from_xml(auth: &XmlElement) -> Result<Self, FlickrError> {
        let perms = required_child(auth, "perms")?.text.trim().to_string();
        let permission = Permission::from_str(&perms).map_err(|_| {
            FlickrError::MalformedResponse(format!("unknown permission level {perms:?}"))
        })?;
        let user = required_child(auth, "user")?;
        Ok(Self {
            token: required_child(auth, "token")?.text.clone(),
            permission,
            user_id: required_attr(user, "nsid")?.to_string(),
            user_name: optional_attr(user, "username"),
            full_name: optional_attr(user, "fullname"),
        })
    }

    /// Returns `creds` carrying the permission and user reported by this check
    pub fn apply_to(&self, creds: Creds) -> Creds {
        creds.with_permission(self.permission).with_user(
            &self.user_id,
            self.user_name.as_deref(),
            self.full_name.as_deref(),
        )
    }
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Checks the token held by the client's credentials.
    ///
    /// OAuth credentials use `flickr.auth.oauth.checkToken`, legacy ones
    /// `flickr.auth.checkToken`.
    pub fn check_token(&self) -> Result<PendingCall<TokenCheck>, FlickrError> {
        let creds = self.client.creds();
        let call = match (creds.oauth_token_pair(), creds.auth_token()) {
            (Some((token, _)), _) => MethodCall::get(
                "flickr.auth.oauth.checkToken",
                Params::new().with("oauth_token", token),
            )
            .signed(),
            (None, Some(_)) => {
                MethodCall::get("flickr.auth.checkToken", Params::new()).authenticated()
            }
            (None, None) => return Err(FlickrError::MissingArgument("auth_token".into())),
        };
        gated_call!(self.client, Permission::None, call, |rsp: &XmlElement| {
            let auth = rsp
                .child("oauth")
                .or_else(|| rsp.child("auth"))
                .ok_or_else(|| FlickrError::ResponseMissing("<oauth> or <auth> in <rsp>".into()))?;
            TokenCheck::from_xml(auth)
        })
    }
}
