/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, MockTransport, client_with, echo_response, param};
    use flickr::rest::{
        Creds, ErrorKind, FlickrError, MethodCall, Params, Permission, PhotoSearchOptions, Token,
    };
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn creds(permission: Permission) -> Creds {
        Creds::from_tokens("k1", Some("s3cr3t"), None, None)
            .with_auth_token("auth-tok")
            .with_permission(permission)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn insufficient_permission_fails_before_any_io() {
        let levels = [
            Permission::None,
            Permission::Read,
            Permission::Write,
            Permission::Delete,
        ];
        for granted in levels {
            let transport = MockTransport::replying(r#"<rsp stat="ok"/>"#);
            let client = client_with(creds(granted), transport.clone());

            let attempts: [(Permission, Result<Token, FlickrError>); 3] = [
                (
                    Permission::Read,
                    client.test().login().map(|p| p.token()),
                ),
                (
                    Permission::Write,
                    client.photos().add_tags("1", &["sea"]).map(|p| p.token()),
                ),
                (
                    Permission::Delete,
                    client.photos().delete("1").map(|p| p.token()),
                ),
            ];

            let mut allowed = 0;
            for (required, attempt) in attempts {
                if granted >= required {
                    assert!(attempt.is_ok());
                    allowed += 1;
                } else {
                    let err = attempt.unwrap_err();
                    assert_eq!(err.kind(), ErrorKind::LocalPermission);
                }
            }
            // Vetoed calls never reach the transport
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(transport.invocations(), allowed, "granted {granted}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn argument_errors_are_synchronous() {
        let transport = MockTransport::replying(r#"<rsp stat="ok"/>"#);
        let client = client_with(creds(Permission::Delete), transport.clone());

        let err = client.photos().get_info("", None).unwrap_err();
        assert!(matches!(err, FlickrError::MissingArgument(_)));
        let err = client.photos().add_tags("42", &[]).unwrap_err();
        assert!(matches!(err, FlickrError::EmptyList(_)));
        let err = client
            .photos()
            .search(&PhotoSearchOptions {
                extras: Some(vec![]),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(transport.invocations(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn every_call_completes_exactly_once() {
        let transport = MockTransport::new(|req| {
            let body = match param(req, "fail") {
                Some(_) => helpers::ok(r#"<rsp stat="fail"><err code="2" msg="nope"/></rsp>"#),
                None => echo_response(req),
            };
            (Duration::from_millis(5), Ok(body))
        });
        let client = client_with(creds(Permission::Read), transport.clone());

        let successes = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut issued = HashSet::new();

        for i in 0..20 {
            let params = if i % 3 == 0 {
                Params::new().with("fail", "1")
            } else {
                Params::new()
            };
            let (s, f) = (successes.clone(), failures.clone());
            let (tx_ok, tx_err) = (tx.clone(), tx.clone());
            let token = client
                .test()
                .echo_with(
                    params,
                    move |token, _| {
                        s.fetch_add(1, Ordering::SeqCst);
                        tx_ok.send(token).unwrap();
                    },
                    move |token, err| {
                        assert_eq!(err.kind(), ErrorKind::Protocol);
                        f.fetch_add(1, Ordering::SeqCst);
                        tx_err.send(token).unwrap();
                    },
                )
                .unwrap();
            assert!(issued.insert(token));
        }
        drop(tx);

        let mut delivered = Vec::new();
        while let Some(token) = rx.recv().await {
            delivered.push(token);
        }
        let unique: HashSet<_> = delivered.iter().copied().collect();
        assert_eq!(delivered.len(), 20);
        assert_eq!(unique, issued);
        assert_eq!(successes.load(Ordering::SeqCst), 13);
        assert_eq!(failures.load(Ordering::SeqCst), 7);
        assert_eq!(transport.invocations(), 20);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_pair_with_their_own_outcomes() {
        const N: u64 = 10;
        // Later calls answer sooner, so completions arrive in reverse order
        let transport = MockTransport::new(|req| {
            let seq: u64 = param(req, "seq").unwrap().parse().unwrap();
            (
                Duration::from_millis((N - seq) * 30),
                Ok(echo_response(req)),
            )
        });
        let client = client_with(creds(Permission::None), transport.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut expected = Vec::new();
        for seq in 0..N {
            let tx = tx.clone();
            let pending = client
                .test()
                .echo(Params::new().with("seq", seq.to_string()))
                .unwrap();
            expected.push((pending.token(), seq));
            tokio::spawn(async move {
                tx.send(pending.await).unwrap();
            });
        }
        drop(tx);

        let mut arrival = Vec::new();
        while let Some(completion) = rx.recv().await {
            let echoed = completion.result.unwrap();
            let seq: u64 = echoed
                .iter()
                .find(|(n, _)| n == "seq")
                .map(|(_, v)| v.parse().unwrap())
                .unwrap();
            let (_, issued_seq) = expected
                .iter()
                .find(|(token, _)| *token == completion.token)
                .unwrap();
            assert_eq!(*issued_seq, seq, "completion paired with the wrong call");
            arrival.push(seq);
        }

        let tokens: HashSet<_> = expected.iter().map(|(t, _)| *t).collect();
        assert_eq!(tokens.len(), N as usize);
        let reversed: Vec<u64> = (0..N).rev().collect();
        assert_eq!(arrival, reversed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn protocol_error_arrives_through_failure_continuation() {
        let transport = MockTransport::replying(r#"<err code="1" msg="Photo not found"/>"#);
        let client = client_with(creds(Permission::None), transport.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx_err = tx.clone();

        let token = client
            .api_client()
            .dispatch_with(
                MethodCall::get("flickr.photos.getInfo", Params::new().with("photo_id", "9")),
                |_| Ok(()),
                move |token, _| tx.send((token, None)).unwrap(),
                move |token, err| tx_err.send((token, Some(err))).unwrap(),
            )
            .unwrap();

        let (delivered, err) = rx.recv().await.unwrap();
        assert_eq!(delivered, token);
        match err {
            Some(FlickrError::Api { code, message }) => {
                assert_eq!(code, 1);
                assert_eq!(message, "Photo not found");
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn transport_failure_is_delivered_not_raised() {
        let transport = MockTransport::new(|_| {
            (Duration::ZERO, Err(FlickrError::HttpStatus(503)))
        });
        let client = client_with(creds(Permission::Read), transport.clone());

        let pending = client.test().null().unwrap();
        let token = pending.token();
        let completion = pending.await;
        assert_eq!(completion.token, token);
        assert_eq!(completion.result.unwrap_err().kind(), ErrorKind::Transport);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn dropped_pending_call_still_runs() {
        let transport = MockTransport::echoing();
        let client = client_with(creds(Permission::None), transport.clone());
        drop(client.test().echo(Params::new()).unwrap());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(transport.invocations(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn absent_optional_arguments_are_not_transmitted() {
        let transport = MockTransport::replying(
            r#"<rsp stat="ok"><photos page="1" pages="1" perpage="100" total="0"/></rsp>"#,
        );
        let client = client_with(creds(Permission::None), transport.clone());

        let options = PhotoSearchOptions {
            text: Some("harbour".into()),
            ..Default::default()
        };
        let page = client.photos().search(&options).unwrap().result().await.unwrap();
        assert!(page.photos.is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let names: Vec<&str> = requests[0].params.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"text"));
        for absent in ["per_page", "page", "safe_search", "has_geo", "tags", "min_upload_date"] {
            assert!(!names.contains(&absent), "{absent} should be omitted");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn signed_calls_carry_credentials_and_signature() {
        let transport = MockTransport::replying(
            r#"<rsp stat="ok"><user id="12037949754@N01"><username>Bees</username></user></rsp>"#,
        );
        let client = client_with(creds(Permission::Read), transport.clone());

        let user = client.test().login().unwrap().result().await.unwrap();
        assert_eq!(user.user_name, "Bees");

        let req = &transport.requests()[0];
        assert_eq!(param(req, "method"), Some("flickr.test.login"));
        assert_eq!(param(req, "api_key"), Some("k1"));
        assert_eq!(param(req, "auth_token"), Some("auth-tok"));
        let unsigned: Vec<(String, String)> = req
            .params
            .iter()
            .filter(|(n, _)| n != "api_sig")
            .cloned()
            .collect();
        assert_eq!(
            param(req, "api_sig"),
            Some(flickr::rest::signing::sign("s3cr3t", &unsigned).as_str())
        );
    }
}
