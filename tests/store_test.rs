use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use std::thread;

use marquee::forms::{ArtistForm, NewShow, VenueForm};
use marquee::store::Store;
use marquee::views;

fn venue_form(name: &str, city: &str, state: &str, genres: &[&str]) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "123 Main St".to_string(),
        phone: "555-0100".to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        facebook_link: String::new(),
    }
}

fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: "Seattle".to_string(),
        state: "WA".to_string(),
        phone: String::new(),
        genres: vec![],
        facebook_link: String::new(),
    }
}

fn at(y: i32, mo: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn search_is_case_insensitive_substring_match() -> Result<()> {
    let store = Store::open_in_memory()?;
    for name in [
        "The Musical Hop",
        "Park Square Live Music & Coffee",
        "The Dueling Pianos Bar",
    ] {
        store.create_venue(&venue_form(name, "San Francisco", "CA", &[]))?;
    }

    let names = |term: &str| -> Result<Vec<String>> {
        Ok(store
            .search_venues(term)?
            .into_iter()
            .map(|v| v.name)
            .collect())
    };

    assert_eq!(names("Hop")?, vec!["The Musical Hop"]);
    assert_eq!(
        names("Music")?,
        vec!["The Musical Hop", "Park Square Live Music & Coffee"]
    );
    assert_eq!(names("hop")?, names("Hop")?);
    assert_eq!(names("")?.len(), 3);
    Ok(())
}

#[test]
fn search_count_matches_result_list() -> Result<()> {
    let store = Store::open_in_memory()?;
    for name in ["The Musical Hop", "The Dueling Pianos Bar"] {
        store.create_venue(&venue_form(name, "New York", "NY", &[]))?;
    }

    for term in ["The", "Hop", "zzz", ""] {
        let count = store.count_venues_matching(term)?;
        let results = store.search_venues(term)?;
        assert_eq!(count as usize, results.len(), "term {:?}", term);
    }
    Ok(())
}

#[test]
fn venue_creation_attaches_genres_to_the_new_venue_only() -> Result<()> {
    let store = Store::open_in_memory()?;
    let first = store.create_venue(&venue_form("First", "Seattle", "WA", &["Punk"]))?;
    let second = store.create_venue(&venue_form("Second", "Seattle", "WA", &["Jazz", "Folk"]))?;

    assert_eq!(store.venue_genres(first)?, vec!["Punk"]);
    assert_eq!(store.venue_genres(second)?, vec!["Jazz", "Folk"]);
    Ok(())
}

#[test]
fn concurrent_venue_creations_do_not_cross_genres() -> Result<()> {
    let store = Arc::new(Store::open_in_memory()?);

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let genre = format!("Genre {}", i);
            let form = venue_form(&format!("Venue {}", i), "Seattle", "WA", &[genre.as_str()]);
            store.create_venue(&form).unwrap()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let venue_id = handle.join().unwrap();
        assert_eq!(
            store.venue_genres(venue_id)?,
            vec![format!("Genre {}", i)],
            "venue {} got someone else's genres",
            venue_id
        );
    }
    Ok(())
}

#[test]
fn failed_creation_leaves_no_owner_and_no_orphaned_genres() -> Result<()> {
    let store = Store::open_in_memory()?;
    // The empty genre name violates the table's CHECK constraint after the
    // venue row has already been inserted inside the transaction.
    let result = store.create_venue(&venue_form("Doomed", "Seattle", "WA", &["Jazz", ""]));
    assert!(result.is_err());

    assert!(store.all_venues()?.is_empty());
    assert_eq!(store.count_venues_matching("")?, 0);
    let survivor = store.create_venue(&venue_form("Survivor", "Seattle", "WA", &[]))?;
    assert!(store.venue_genres(survivor)?.is_empty());
    Ok(())
}

#[test]
fn show_requires_existing_venue_and_artist() -> Result<()> {
    let store = Store::open_in_memory()?;
    let venue_id = store.create_venue(&venue_form("The Spot", "Seattle", "WA", &[]))?;

    let orphan = NewShow {
        venue_id,
        artist_id: 999,
        start_time: at(2035, 4, 1, 20),
    };
    assert!(store.create_show(&orphan).is_err());
    assert!(store.all_shows()?.is_empty());

    let artist_id = store.create_artist(&artist_form("Guns N Petals"))?;
    let booked = NewShow {
        venue_id,
        artist_id,
        start_time: at(2035, 4, 1, 20),
    };
    store.create_show(&booked)?;
    assert_eq!(store.all_shows()?.len(), 1);
    Ok(())
}

#[test]
fn duplicate_bookings_are_allowed() -> Result<()> {
    let store = Store::open_in_memory()?;
    let venue_id = store.create_venue(&venue_form("The Spot", "Seattle", "WA", &[]))?;
    let artist_id = store.create_artist(&artist_form("The Wild Sax Band"))?;

    let show = NewShow {
        venue_id,
        artist_id,
        start_time: at(2035, 4, 1, 20),
    };
    store.create_show(&show)?;
    store.create_show(&show)?;
    assert_eq!(store.all_shows()?.len(), 2);
    Ok(())
}

#[test]
fn show_counts_agree_with_partitioned_lists() -> Result<()> {
    let store = Store::open_in_memory()?;
    let venue_id = store.create_venue(&venue_form("The Spot", "Seattle", "WA", &[]))?;
    let artist_id = store.create_artist(&artist_form("Matt Quevedo"))?;

    let now = at(2024, 6, 1, 20);
    for start_time in [
        at(2019, 5, 21, 21),
        at(2024, 5, 31, 20),
        at(2035, 4, 1, 20),
        now, // boundary: in neither bucket
    ] {
        store.create_show(&NewShow {
            venue_id,
            artist_id,
            start_time,
        })?;
    }

    let past_count = store.past_show_count_for_venue(venue_id, now)?;
    let upcoming_count = store.upcoming_show_count_for_venue(venue_id, now)?;
    let shows = views::partition_shows(store.shows_at_venue(venue_id)?, now);

    assert_eq!(past_count as usize, shows.past.len());
    assert_eq!(upcoming_count as usize, shows.upcoming.len());
    assert_eq!(past_count, 2);
    assert_eq!(upcoming_count, 1);

    // The artist side sees the same shows from the other direction.
    assert_eq!(store.past_show_count_for_artist(artist_id, now)?, 2);
    assert_eq!(store.upcoming_show_count_for_artist(artist_id, now)?, 1);
    let artist_shows = views::partition_shows(store.shows_by_artist(artist_id)?, now);
    assert_eq!(artist_shows.past.len(), 2);
    assert_eq!(artist_shows.upcoming.len(), 1);
    assert_eq!(artist_shows.past[0].partner_name, "The Spot");
    Ok(())
}

#[test]
fn profile_show_listings_carry_partner_display_fields() -> Result<()> {
    let store = Store::open_in_memory()?;
    let venue_id = store.create_venue(&venue_form("The Musical Hop", "San Francisco", "CA", &[]))?;
    let artist_id = store.create_artist(&artist_form("Guns N Petals"))?;
    store.create_show(&NewShow {
        venue_id,
        artist_id,
        start_time: at(2019, 5, 21, 21),
    })?;

    let now = at(2024, 6, 1, 20);
    let shows = views::partition_shows(store.shows_at_venue(venue_id)?, now);
    assert_eq!(shows.past.len(), 1);
    assert_eq!(shows.past[0].partner_id, artist_id);
    assert_eq!(shows.past[0].partner_name, "Guns N Petals");
    assert_eq!(shows.past[0].start_time, "2019-05-21 21:00:00");
    Ok(())
}

#[test]
fn open_on_disk_is_idempotent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("marquee.db");

    {
        let store = Store::open(&path)?;
        store.create_venue(&venue_form("The Musical Hop", "San Francisco", "CA", &["Jazz"]))?;
    }

    // Reopening runs the migrations again and keeps existing data.
    let store = Store::open(&path)?;
    let venues = store.all_venues()?;
    assert_eq!(venues.len(), 1);
    assert_eq!(store.venue_genres(venues[0].id)?, vec!["Jazz"]);
    Ok(())
}
