//! Integration tests for `DieselUserRepository` and `DieselSurveyRepository`
//! against embedded PostgreSQL.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use tripadapt::domain::ports::{SurveyRepository, UserPersistenceError, UserRepository};
use tripadapt::domain::{PasswordHash, Survey, SurveyId, UserAccount, UserProfile, Username};
use tripadapt::outbound::persistence::{DieselSurveyRepository, DieselUserRepository};

mod support;

use support::{PgContext, count_rows, handle_cluster_setup_failure, setup_pg_context};

fn stored_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 14, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn account(name: &str) -> UserAccount {
    UserAccount {
        username: Username::new(name).expect("valid username"),
        password_hash: PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        profile: UserProfile {
            gender: "female".to_owned(),
            age: "29".to_owned(),
            ethnicity: "prefer not to say".to_owned(),
        },
        created_at: stored_at(),
    }
}

#[fixture]
fn pg_context() -> Option<PgContext> {
    match setup_pg_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn created_account_is_found_by_username(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else {
        eprintln!("SKIP-TEST-CLUSTER: created_account_is_found_by_username skipped");
        return;
    };
    let repository = DieselUserRepository::new(context.pool.clone());
    let alice = account("alice");

    let found = context.runtime.block_on(async {
        repository.create(&alice).await.expect("insert user");
        repository
            .find_by_username(&alice.username)
            .await
            .expect("lookup user")
    });

    assert_eq!(found, Some(alice));
}

#[rstest]
fn unknown_username_is_absent(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_username_is_absent skipped");
        return;
    };
    let repository = DieselUserRepository::new(context.pool.clone());
    let nobody = Username::new("nobody").expect("valid username");

    let found = context
        .runtime
        .block_on(repository.find_by_username(&nobody))
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
fn second_insert_for_same_username_is_a_duplicate(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_insert_for_same_username_is_a_duplicate skipped");
        return;
    };
    let repository = DieselUserRepository::new(context.pool.clone());
    let first = account("alice");
    let mut second = account("alice");
    second.profile.gender = "male".to_owned();

    let result = context.runtime.block_on(async {
        repository.create(&first).await.expect("first insert");
        repository.create(&second).await
    });

    assert_eq!(
        result,
        Err(UserPersistenceError::duplicate_username("alice"))
    );
    assert_eq!(
        count_rows(
            &context.database_url,
            "SELECT count(*) AS count FROM users WHERE gender = 'female'"
        ),
        1,
        "the first account is kept"
    );
}

#[rstest]
fn surveys_are_appended_without_an_account(pg_context: Option<PgContext>) {
    let Some(context) = pg_context else {
        eprintln!("SKIP-TEST-CLUSTER: surveys_are_appended_without_an_account skipped");
        return;
    };
    let repository = DieselSurveyRepository::new(context.pool.clone());
    let survey = |age: Option<&str>| Survey {
        survey_id: SurveyId::random(),
        username: Username::new("drifter").expect("valid username"),
        gender: None,
        age: age.map(str::to_owned),
        ethnicity: None,
        created_at: stored_at(),
    };

    context.runtime.block_on(async {
        repository.save(&survey(Some("25-34"))).await.expect("first survey");
        repository.save(&survey(None)).await.expect("second survey");
    });

    assert_eq!(
        count_rows(
            &context.database_url,
            "SELECT count(*) AS count FROM surveys WHERE username = 'drifter'"
        ),
        2
    );
}
