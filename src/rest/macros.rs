/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Enums whose wire form is the declared strum token
macro_rules! wire_token_enum {
    ( $($t:ty),+ $(,)? ) => {
        $(
            impl $crate::rest::WireEnum for $t {
                fn wire_value(&self) -> String {
                    let token: &'static str = self.into();
                    token.to_string()
                }
            }
        )+
    };
}

// Enums whose wire form is the underlying ordinal
macro_rules! wire_ordinal_enum {
    ( $($t:ty => $repr:ty),+ $(,)? ) => {
        $(
            impl $crate::rest::WireEnum for $t {
                fn wire_value(&self) -> String {
                    <$repr>::from(*self).to_string()
                }
            }
        )+
    };
}

// Issues a call for a façade method: permission gate first, then parameters, then dispatch.
macro_rules! gated_call {
    ( $c:expr, $perm:expr, $call:expr, $proj:expr ) => {{
        $c.check_permission($perm)?;
        let call = $call;
        $c.api_client().dispatch(call, $proj)
    }};
}

pub(crate) use {gated_call, wire_ordinal_enum, wire_token_enum};
