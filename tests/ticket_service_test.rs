mod common;

use chrono::{NaiveDate, Utc};
use common::{services, utc, Services, UnreachableStore};
use space_travel::{Client, NewTicket, Planet, SpaceTravelError, TicketService};
use tokio_test::{assert_err, assert_ok};

struct Fixture {
    s: Services,
    ada: Client,
    earth: Planet,
    mars: Planet,
    venus: Planet,
}

async fn fixture() -> Fixture {
    let s = services().await;
    let ada = s.client("Ada Lovelace").await;
    let earth = s.planet("EAR", "Earth").await;
    let mars = s.planet("MAR", "Mars").await;
    let venus = s.planet("VEN", "Venus").await;
    Fixture {
        s,
        ada,
        earth,
        mars,
        venus,
    }
}

#[tokio::test]
async fn test_create_defaults_created_at_to_now() {
    let f = fixture().await;
    let before = Utc::now();

    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    assert!(ticket.id > 0);
    assert_eq!(ticket.client, f.ada);
    assert_eq!(ticket.from_planet, f.earth);
    assert_eq!(ticket.to_planet, f.mars);
    // Stored with millisecond precision.
    assert!(ticket.created_at.timestamp_millis() >= before.timestamp_millis());
    assert!(ticket.created_at <= Utc::now());
}

#[tokio::test]
async fn test_create_keeps_explicit_created_at() {
    let f = fixture().await;
    let at = utc(2024, 3, 14, 9, 26, 53);

    let ticket = f.s.ticket_at(&f.ada, &f.earth, &f.mars, at).await;

    assert_eq!(ticket.created_at, at);
    assert_eq!(assert_ok!(f.s.tickets.find_by_id(ticket.id).await).created_at, at);
}

#[tokio::test]
async fn test_create_rejects_identical_legs() {
    let f = fixture().await;

    let err = assert_err!(
        f.s.tickets
            .create(NewTicket::new(f.ada.clone(), f.earth.clone(), f.earth.clone()))
            .await
    );

    assert!(matches!(err, SpaceTravelError::InvalidInput { .. }));
    assert!(assert_ok!(f.s.tickets.find_all().await).is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_references() {
    let service = TicketService::new(UnreachableStore, UnreachableStore);
    let earth = Planet::new("EAR", "Earth");
    let mars = Planet::new("MAR", "Mars");

    let incomplete = [
        NewTicket::default(),
        NewTicket {
            from_planet: Some(earth.clone()),
            to_planet: Some(mars.clone()),
            ..NewTicket::default()
        },
        NewTicket {
            client: Some(Client {
                id: 1,
                name: "Ada".into(),
            }),
            from_planet: Some(earth),
            ..NewTicket::default()
        },
    ];

    for ticket in incomplete {
        let err = assert_err!(service.create(ticket).await);
        assert_eq!(
            err.user_friendly_message(),
            "Client, fromPlanet and toPlanet must not be null"
        );
    }
}

#[tokio::test]
async fn test_create_rejects_identical_legs_before_storage() {
    let service = TicketService::new(UnreachableStore, UnreachableStore);
    let client = Client {
        id: 1,
        name: "Ada".into(),
    };
    let earth = Planet::new("EAR", "Earth");

    let err = assert_err!(
        service
            .create(NewTicket::new(client, earth.clone(), earth))
            .await
    );

    assert_eq!(
        err.user_friendly_message(),
        "fromPlanet and toPlanet must differ, both are 'EAR'"
    );
}

#[tokio::test]
async fn test_find_by_id_missing() {
    let f = fixture().await;

    let err = assert_err!(f.s.tickets.find_by_id(77).await);
    assert_eq!(err.to_string(), "Ticket with id 77 not found.");
}

#[tokio::test]
async fn test_filtered_finds_return_empty_without_error() {
    let f = fixture().await;

    assert!(assert_ok!(f.s.tickets.find_all_by_client(f.ada.id).await).is_empty());
    assert!(assert_ok!(f.s.tickets.find_all_by_client(999).await).is_empty());
    assert!(assert_ok!(f.s.tickets.find_all_by_from_planet("EAR").await).is_empty());
    assert!(assert_ok!(f.s.tickets.find_all_by_to_planet("NOPE").await).is_empty());
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(assert_ok!(f.s.tickets.find_all_by_date(date).await).is_empty());
}

#[tokio::test]
async fn test_filtered_finds() {
    let f = fixture().await;
    let bob = f.s.client("Bob Builder").await;
    let t1 = f.s.ticket(&f.ada, &f.earth, &f.mars).await;
    let t2 = f.s.ticket(&bob, &f.mars, &f.venus).await;
    let t3 = f.s.ticket(&f.ada, &f.venus, &f.earth).await;

    let ids = |tickets: Vec<space_travel::Ticket>| tickets.into_iter().map(|t| t.id).collect::<Vec<_>>();

    assert_eq!(ids(assert_ok!(f.s.tickets.find_all().await)), vec![t1.id, t2.id, t3.id]);
    assert_eq!(
        ids(assert_ok!(f.s.tickets.find_all_by_client(f.ada.id).await)),
        vec![t1.id, t3.id]
    );
    assert_eq!(
        ids(assert_ok!(f.s.tickets.find_all_by_from_planet("MAR").await)),
        vec![t2.id]
    );
    assert_eq!(
        ids(assert_ok!(f.s.tickets.find_all_by_to_planet("EAR").await)),
        vec![t3.id]
    );
}

#[tokio::test]
async fn test_find_all_by_date_is_half_open_utc_day() {
    let f = fixture().await;
    let before = f.s.ticket_at(&f.ada, &f.earth, &f.mars, utc(2024, 5, 31, 23, 59, 59)).await;
    let first = f.s.ticket_at(&f.ada, &f.earth, &f.mars, utc(2024, 6, 1, 0, 0, 0)).await;
    let last = f.s.ticket_at(&f.ada, &f.mars, &f.earth, utc(2024, 6, 1, 23, 59, 59)).await;
    let next = f.s.ticket_at(&f.ada, &f.earth, &f.venus, utc(2024, 6, 2, 0, 0, 0)).await;

    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let found: Vec<i64> = assert_ok!(f.s.tickets.find_all_by_date(date).await)
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(found, vec![first.id, last.id]);
    assert!(!found.contains(&before.id));
    assert!(!found.contains(&next.id));
}

#[tokio::test]
async fn test_update_from_planet() {
    let f = fixture().await;
    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    let updated = assert_ok!(f.s.tickets.update_from_planet(ticket.id, "VEN").await);

    assert_eq!(updated.from_planet, f.venus);
    assert_eq!(updated.to_planet, f.mars);
    assert_eq!(updated.created_at, ticket.created_at);
}

#[tokio::test]
async fn test_update_to_planet() {
    let f = fixture().await;
    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    let updated = assert_ok!(f.s.tickets.update_to_planet(ticket.id, "VEN").await);

    assert_eq!(updated.from_planet, f.earth);
    assert_eq!(updated.to_planet, f.venus);
}

#[tokio::test]
async fn test_update_leg_to_opposite_leg_is_rejected() {
    let f = fixture().await;
    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    let err = assert_err!(f.s.tickets.update_from_planet(ticket.id, "MAR").await);
    assert!(matches!(err, SpaceTravelError::InvalidInput { .. }));

    let err = assert_err!(f.s.tickets.update_to_planet(ticket.id, "EAR").await);
    assert!(matches!(err, SpaceTravelError::InvalidInput { .. }));

    let unchanged = assert_ok!(f.s.tickets.find_by_id(ticket.id).await);
    assert_eq!(unchanged, ticket);
}

#[tokio::test]
async fn test_update_leg_unknown_planet() {
    let f = fixture().await;
    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    let err = assert_err!(f.s.tickets.update_from_planet(ticket.id, "PLU").await);
    assert_eq!(err.to_string(), "From planet not found with id: PLU");

    let err = assert_err!(f.s.tickets.update_to_planet(ticket.id, "PLU").await);
    assert_eq!(err.to_string(), "To planet not found with id: PLU");
}

#[tokio::test]
async fn test_update_leg_unknown_ticket() {
    let f = fixture().await;

    let err = assert_err!(f.s.tickets.update_to_planet(404, "VEN").await);
    assert_eq!(
        err.to_string(),
        "Attempted to update nonexistent ticket with id: 404"
    );
}

#[tokio::test]
async fn test_delete_ticket() {
    let f = fixture().await;
    let ticket = f.s.ticket(&f.ada, &f.earth, &f.mars).await;

    assert_ok!(f.s.tickets.delete(ticket.id).await);

    assert!(assert_err!(f.s.tickets.find_by_id(ticket.id).await).is_not_found());
    let err = assert_err!(f.s.tickets.delete(ticket.id).await);
    assert_eq!(
        err.to_string(),
        format!("Attempted to delete nonexistent ticket with id: {}", ticket.id)
    );
}

#[tokio::test]
async fn test_bulk_delete_with_no_match_is_not_found() {
    let f = fixture().await;

    let err = assert_err!(f.s.tickets.delete_all_by_client_id(f.ada.id).await);
    assert_eq!(
        err.to_string(),
        format!("No tickets found for clientId: {}", f.ada.id)
    );

    let err = assert_err!(f.s.tickets.delete_all_by_from_planet_id("EAR").await);
    assert_eq!(err.to_string(), "No tickets found for fromPlanetId: EAR");

    let err = assert_err!(f.s.tickets.delete_all_by_to_planet_id("MAR").await);
    assert_eq!(err.to_string(), "No tickets found for toPlanetId: MAR");
}

#[tokio::test]
async fn test_bulk_delete_removes_only_matches() {
    let f = fixture().await;
    let bob = f.s.client("Bob Builder").await;
    f.s.ticket(&f.ada, &f.earth, &f.mars).await;
    f.s.ticket(&f.ada, &f.mars, &f.venus).await;
    let kept = f.s.ticket(&bob, &f.venus, &f.mars).await;

    assert_eq!(assert_ok!(f.s.tickets.delete_all_by_client_id(f.ada.id).await), 2);
    assert_eq!(assert_ok!(f.s.tickets.find_all().await), vec![kept.clone()]);

    assert_eq!(assert_ok!(f.s.tickets.delete_all_by_to_planet_id("MAR").await), 1);
    assert!(assert_ok!(f.s.tickets.find_all().await).is_empty());
}

#[tokio::test]
async fn test_deleting_planet_cascades_both_legs() {
    let f = fixture().await;
    f.s.ticket(&f.ada, &f.earth, &f.mars).await;
    f.s.ticket(&f.ada, &f.mars, &f.earth).await;
    let kept = f.s.ticket(&f.ada, &f.earth, &f.venus).await;

    assert_ok!(f.s.planets.delete("MAR").await);

    assert_eq!(assert_ok!(f.s.tickets.find_all().await), vec![kept]);
    assert!(assert_err!(f.s.planets.find_by_id("MAR").await).is_not_found());
}

#[tokio::test]
async fn test_deleting_client_cascades_tickets() {
    let f = fixture().await;
    let bob = f.s.client("Bob Builder").await;
    f.s.ticket(&f.ada, &f.earth, &f.mars).await;
    f.s.ticket(&f.ada, &f.venus, &f.mars).await;
    let kept = f.s.ticket(&bob, &f.earth, &f.mars).await;

    assert_ok!(f.s.clients.delete(f.ada.id).await);

    assert!(assert_ok!(f.s.tickets.find_all_by_client(f.ada.id).await).is_empty());
    assert_eq!(assert_ok!(f.s.tickets.find_all().await), vec![kept]);
}

#[tokio::test]
async fn test_travel_agency_scenario() {
    let s = services().await;
    let earth = s.planet("EAR", "Earth").await;
    let mars = s.planet("MAR", "Mars").await;
    let ada = s.client("Ada").await;

    let ticket = s.ticket(&ada, &earth, &mars).await;
    assert_eq!(assert_ok!(s.tickets.find_all_by_from_planet("EAR").await).len(), 1);

    // Moving the departure onto the destination is refused.
    assert_err!(s.tickets.update_from_planet(ticket.id, "MAR").await);

    assert_ok!(s.planets.delete("EAR").await);
    assert!(assert_ok!(s.tickets.find_all_by_from_planet("EAR").await).is_empty());
    assert!(assert_err!(s.tickets.delete_all_by_from_planet_id("EAR").await).is_not_found());
    assert!(assert_ok!(s.tickets.find_all().await).is_empty());
    assert_eq!(assert_ok!(s.planets.find_all().await), vec![mars]);
    assert_eq!(assert_ok!(s.clients.find_all().await), vec![ada]);
}
