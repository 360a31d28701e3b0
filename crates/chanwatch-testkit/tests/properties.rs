//! Property tests over generated ids, scripts and channel sets.

use std::collections::BTreeSet;

use chanwatch::{ChannelId, IntoId, UserId};
use chanwatch_testkit::generators::{
    base_username, channel_set, id_repr, name, session, user_script,
};
use chanwatch_testkit::{Backend, UserOp};
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_id_form_finds_the_same_user(repr in id_repr(), user_name in name()) {
        let expected: UserId = repr.clone().into_id().unwrap();
        block_on(async {
            for backend in Backend::ALL {
                let f = backend.fixture();
                f.db.add_user(repr.clone(), user_name.clone()).await.unwrap();
                assert!(f.db.is_user_exist(expected).await.unwrap());
                assert!(f.db.is_user_exist(expected.get().to_string()).await.unwrap());
            }
        });
    }

    #[test]
    fn count_is_adds_minus_deletes(script in user_script()) {
        block_on(async {
            for backend in Backend::ALL {
                let f = backend.fixture();
                let mut live = BTreeSet::new();
                for op in &script {
                    match op {
                        UserOp::Add(id, user_name) => {
                            f.db.add_user(*id, user_name.clone()).await.unwrap();
                            live.insert(*id);
                        }
                        UserOp::Delete(id) => {
                            f.db.delete_user(*id).await.unwrap();
                            live.remove(id);
                        }
                    }
                }
                assert_eq!(f.db.total_users_count().await.unwrap(), live.len() as u64);
                for id in &live {
                    assert!(f.db.is_user_exist(*id).await.unwrap());
                }
            }
        });
    }

    #[test]
    fn session_reads_back_what_was_set(s in session(), user_name in name()) {
        block_on(async {
            for backend in Backend::ALL {
                let f = backend.fixture();
                f.db.add_user(1i64, user_name.clone()).await.unwrap();
                f.db.set_session(1i64, s.clone()).await.unwrap();
                assert_eq!(f.db.get_session(1i64).await.unwrap(), Some(s.clone()));
            }
        });
    }

    #[test]
    fn user_channels_are_exactly_owned_active(channels in channel_set()) {
        block_on(async {
            for backend in Backend::ALL {
                let f = backend.fixture();
                for c in &channels {
                    f.db.add_channel(c.user_id, c.channel_id, c.base_username.clone(), c.interval)
                        .await
                        .unwrap();
                    if !c.active {
                        f.db.stop_channel(c.channel_id).await.unwrap();
                    }
                }

                for owner in 1i64..=4 {
                    let expected: Vec<ChannelId> = channels
                        .iter()
                        .filter(|c| c.user_id == owner && c.active)
                        .map(|c| ChannelId(c.channel_id))
                        .collect();
                    let got: Vec<ChannelId> = f
                        .db
                        .get_user_channels(owner)
                        .await
                        .unwrap()
                        .iter()
                        .map(|c| c.channel_id)
                        .collect();
                    assert_eq!(got, expected, "{:?} owner {}", backend, owner);
                }

                let active = f.db.get_all_active_channels().await.unwrap();
                assert_eq!(active.len(), channels.iter().filter(|c| c.active).count());
            }
        });
    }

    #[test]
    fn resume_restores_membership(channel_id in 1i64..1_000_000, username in base_username()) {
        block_on(async {
            for backend in Backend::ALL {
                let f = backend.fixture();
                f.db.add_channel(1i64, channel_id, username.clone(), 60).await.unwrap();
                f.db.stop_channel(channel_id).await.unwrap();
                assert!(f.db.get_all_active_channels().await.unwrap().is_empty());
                f.db.resume_channel(channel_id).await.unwrap();
                let active = f.db.get_all_active_channels().await.unwrap();
                assert_eq!(active.len(), 1);
                assert_eq!(active[0].channel_id, ChannelId(channel_id));
            }
        });
    }
}
