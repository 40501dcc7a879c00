/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::{Creds, Permission};

/// Checks that `creds` were granted at least `required` before anything is sent.
pub fn check_permission(creds: &Creds, required: Permission) -> Result<(), FlickrError> {
    let granted = creds.permission();
    if granted >= required {
        return Ok(());
    }
    log::debug!("Call vetoed locally: {required} required, {granted} granted");
    Err(FlickrError::Permission { required, granted })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Permission; 4] = [
        Permission::None,
        Permission::Read,
        Permission::Write,
        Permission::Delete,
    ];

    #[test]
    fn granted_at_or_above_required_passes() {
        for (g, granted) in LEVELS.iter().enumerate() {
            let creds = Creds::from_tokens("k", None, None, None).with_permission(*granted);
            for (r, required) in LEVELS.iter().enumerate() {
                let result = check_permission(&creds, *required);
                if g >= r {
                    assert!(result.is_ok(), "{granted} should satisfy {required}");
                } else {
                    match result {
                        Err(FlickrError::Permission {
                            required: req,
                            granted: gr,
                        }) => {
                            assert_eq!(req, *required);
                            assert_eq!(gr, *granted);
                        }
                        other => panic!("expected permission error, got {other:?}"),
                    }
                }
            }
        }
    }
}
