use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Engine, EngineError, EventFilter, EventNew, EventUpdate, Role, User, UserNew, UserUpdate,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn user(engine: &Engine, name: &str) -> User {
    engine
        .create_user(UserNew::new(
            name,
            format!("{}@example.com", name.to_lowercase()),
            "password",
        ))
        .await
        .unwrap()
}

fn meetup(name: &str, capacity: i32) -> EventNew {
    EventNew::new(
        name,
        NaiveDate::from_ymd_opt(2024, 9, 12).unwrap(),
        "06:30 PM",
    )
    .description("Talks and pizza")
    .organizer("Rust Turin")
    .location("Turin, IT")
    .capacity(capacity)
    .category("Meetup")
    .tags(["Rust", "Community"])
}

#[tokio::test]
async fn seeding_after_reset_always_yields_the_six_samples() {
    let (engine, db) = engine_with_db().await;
    let expected: Vec<String> = engine::sample_events()
        .into_iter()
        .map(|event| event.name)
        .collect();

    for _ in 0..2 {
        migration::Migrator::fresh(&db).await.unwrap();
        let created = engine.seed_sample_events().await.unwrap();
        let names: Vec<String> = created.iter().map(|event| event.name.clone()).collect();
        assert_eq!(names, expected);
        assert_eq!(engine.count_events().await.unwrap(), 6);
    }
}

#[tokio::test]
async fn seeded_events_have_no_creator_and_keep_tags() {
    let (engine, _db) = engine_with_db().await;
    engine.seed_sample_events().await.unwrap();

    let events = engine.list_events(&EventFilter::default()).await.unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0].name, "React Conference 2024");
    assert_eq!(
        events[0].tags,
        vec!["React", "Web Development", "JavaScript"]
    );
    assert!(events.iter().all(|event| event.created_by.is_none()));
}

#[tokio::test]
async fn list_events_filters_by_category_and_search() {
    let (engine, _db) = engine_with_db().await;
    engine.seed_sample_events().await.unwrap();

    let workshops = engine
        .list_events(&EventFilter {
            category: Some("workshop".to_string()),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(workshops.len(), 1);
    assert_eq!(workshops[0].name, "Node.js Workshop");

    let backend = engine
        .list_events(&EventFilter {
            category: None,
            search: Some("database".to_string()),
        })
        .await
        .unwrap();
    let names: Vec<&str> = backend.iter().map(|event| event.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["MongoDB Database Optimization", "Full Stack Development Bootcamp"]
    );
}

#[tokio::test]
async fn search_matches_wildcards_literally() {
    let (engine, _db) = engine_with_db().await;
    engine.seed_sample_events().await.unwrap();

    let search = |text: &str| EventFilter {
        category: None,
        search: Some(text.to_string()),
    };

    assert!(engine.list_events(&search("%")).await.unwrap().is_empty());
    assert!(engine.list_events(&search("UI_UX")).await.unwrap().is_empty());

    let design = engine.list_events(&search("UI/UX")).await.unwrap();
    assert_eq!(design.len(), 1);
    assert_eq!(design[0].name, "Web Design Masterclass");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    user(&engine, "Ada").await;

    let err = engine
        .create_user(UserNew::new("Other Ada", "ADA@example.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("ada@example.com".to_string()));
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_user(UserNew::new("  ", "ada@example.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField("name must not be empty".to_string())
    );

    let err = engine
        .create_event(meetup("Meetup", 10).organizer(""), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField("organizer must not be empty".to_string())
    );

    let err = engine
        .create_event(meetup("Meetup", -1), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField("capacity must be >= 0".to_string())
    );
}

#[tokio::test]
async fn authenticate_checks_password_and_activity() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;

    let logged = engine
        .authenticate(" Ada@Example.com ", "password")
        .await
        .unwrap();
    assert_eq!(logged.id, ada.id);

    assert_eq!(
        engine.authenticate("ada@example.com", "nope").await,
        Err(EngineError::WrongCredentials)
    );
    assert_eq!(
        engine.authenticate("nobody@example.com", "password").await,
        Err(EngineError::WrongCredentials)
    );

    let found = engine.user_by_email("ADA@example.com").await.unwrap();
    let disabled = engine.set_user_active(found.id, false).await.unwrap();
    assert!(!disabled.is_active);
    assert_eq!(
        engine.authenticate("ada@example.com", "password").await,
        Err(EngineError::WrongCredentials)
    );

    engine.set_user_active(ada.id, true).await.unwrap();
    assert!(engine.authenticate("ada@example.com", "password").await.is_ok());

    assert_eq!(
        engine.user_by_email("nobody@example.com").await,
        Err(EngineError::KeyNotFound("user not exists".to_string()))
    );
}

#[tokio::test]
async fn update_user_changes_password_and_guards_ownership() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;

    let err = engine
        .update_user(
            ada.id,
            UserUpdate {
                name: Some("Mallory".to_string()),
                ..Default::default()
            },
            &bob,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .update_user(
            ada.id,
            UserUpdate {
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
            &ada,
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("bob@example.com".to_string()));

    let updated = engine
        .update_user(
            ada.id,
            UserUpdate {
                name: Some("Ada Lovelace".to_string()),
                password: Some("new-password".to_string()),
                ..Default::default()
            },
            &ada,
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert!(
        engine
            .authenticate("ada@example.com", "new-password")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn created_event_references_its_creator() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;

    let event = engine
        .create_event(meetup("Rust Meetup", 30), Some(ada.id))
        .await
        .unwrap();
    assert_eq!(event.created_by, Some(ada.id));

    let details = engine.event_details(event.id).await.unwrap();
    assert_eq!(details.creator.map(|c| c.id), Some(ada.id));
    assert!(details.registrants.is_empty());

    let created = engine.list_created_events(ada.id).await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, event.id);
}

#[tokio::test]
async fn unknown_creator_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .create_event(meetup("Rust Meetup", 30), Some(uuid::Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));
    assert_eq!(engine.count_events().await.unwrap(), 0);
}

#[tokio::test]
async fn registrations_are_symmetric() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;
    let first = engine
        .create_event(meetup("First", 10), Some(ada.id))
        .await
        .unwrap();
    let second = engine
        .create_event(meetup("Second", 10), Some(ada.id))
        .await
        .unwrap();

    engine.add_registration(first.id, ada.id).await.unwrap();
    engine.add_registration(first.id, bob.id).await.unwrap();
    engine.add_registration(second.id, bob.id).await.unwrap();

    for event in [&first, &second] {
        let registrants = engine.list_registrants(event.id).await.unwrap();
        for registrant in &registrants {
            let events = engine.list_registered_events(registrant.id).await.unwrap();
            assert!(events.iter().any(|e| e.id == event.id));
        }
    }
    for member in [&ada, &bob] {
        let events = engine.list_registered_events(member.id).await.unwrap();
        for event in &events {
            let registrants = engine.list_registrants(event.id).await.unwrap();
            assert!(registrants.iter().any(|u| u.id == member.id));
        }
    }

    let registrants: Vec<_> = engine
        .list_registrants(first.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(registrants, vec![ada.id, bob.id]);
    assert_eq!(engine.list_registered_events(bob.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn registering_twice_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let event = engine.create_event(meetup("Meetup", 10), None).await.unwrap();

    let registration = engine.add_registration(event.id, ada.id).await.unwrap();
    assert_eq!(registration.event_id, event.id);
    assert_eq!(registration.user_id, ada.id);
    assert_eq!(
        engine.add_registration(event.id, ada.id).await.unwrap_err(),
        EngineError::ExistingKey("registration".to_string())
    );
    assert_eq!(engine.list_registrants(event.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn registrations_stop_at_capacity() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;
    let event = engine.create_event(meetup("Tiny", 1), None).await.unwrap();

    engine.add_registration(event.id, ada.id).await.unwrap();
    assert_eq!(
        engine.add_registration(event.id, bob.id).await.unwrap_err(),
        EngineError::EventFull("Tiny".to_string())
    );

    engine.remove_registration(event.id, ada.id).await.unwrap();
    engine.add_registration(event.id, bob.id).await.unwrap();
}

#[tokio::test]
async fn leaving_without_registration_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let event = engine.create_event(meetup("Meetup", 10), None).await.unwrap();

    assert_eq!(
        engine.remove_registration(event.id, ada.id).await,
        Err(EngineError::KeyNotFound("registration not exists".to_string()))
    );
}

#[tokio::test]
async fn deleting_a_creator_keeps_its_events() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;
    let event = engine
        .create_event(meetup("Ada's Meetup", 10), Some(ada.id))
        .await
        .unwrap();
    engine.add_registration(event.id, ada.id).await.unwrap();
    engine.add_registration(event.id, bob.id).await.unwrap();

    engine.delete_user(ada.id, &ada).await.unwrap();

    let kept = engine.event(event.id).await.unwrap();
    assert_eq!(kept.created_by, None);
    let registrants: Vec<_> = engine
        .list_registrants(event.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(registrants, vec![bob.id]);
    assert_eq!(
        engine.user(ada.id).await,
        Err(EngineError::KeyNotFound("user not exists".to_string()))
    );
}

#[tokio::test]
async fn only_creator_or_admin_can_change_an_event() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;
    let event = engine
        .create_event(meetup("Meetup", 10), Some(ada.id))
        .await
        .unwrap();

    let rename = EventUpdate {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        engine.update_event(event.id, rename.clone(), &bob).await,
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        engine.delete_event(event.id, &bob).await,
        Err(EngineError::Forbidden(_))
    ));

    let admin = engine.set_user_role(bob.id, Role::Admin).await.unwrap();
    let updated = engine.update_event(event.id, rename, &admin).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.created_by, Some(ada.id));
    assert_eq!(engine.event(event.id).await.unwrap().name, "Renamed");
}

#[tokio::test]
async fn capacity_cannot_drop_below_registrations() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let bob = user(&engine, "Bob").await;
    let event = engine
        .create_event(meetup("Meetup", 10), Some(ada.id))
        .await
        .unwrap();
    engine.add_registration(event.id, ada.id).await.unwrap();
    engine.add_registration(event.id, bob.id).await.unwrap();

    let err = engine
        .update_event(
            event.id,
            EventUpdate {
                capacity: Some(1),
                ..Default::default()
            },
            &ada,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidField(_)));
}

#[tokio::test]
async fn deleting_an_event_drops_its_registrations() {
    let (engine, _db) = engine_with_db().await;
    let ada = user(&engine, "Ada").await;
    let event = engine
        .create_event(meetup("Meetup", 10), Some(ada.id))
        .await
        .unwrap();
    engine.add_registration(event.id, ada.id).await.unwrap();

    engine.delete_event(event.id, &ada).await.unwrap();

    assert!(engine.list_registered_events(ada.id).await.unwrap().is_empty());
    assert_eq!(
        engine.event(event.id).await,
        Err(EngineError::KeyNotFound("event not exists".to_string()))
    );
}
