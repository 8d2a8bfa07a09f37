//! The aggregation layer: turns flat store rows into the grouped, enriched
//! view models the templates render. Nothing in here touches the database;
//! handlers fetch rows through the store and hand them over.

use chrono::NaiveDateTime;

use crate::domain::{Artist, ShowRecord, ShowRow, Venue, TIME_FORMAT};

/// Venues sharing one (city, state) pair, in their original relative order.
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<Venue>,
}

/// Groups venues by (city, state), keyed in first-seen order.
///
/// Two passes on purpose: the first collects distinct pairs in the order
/// they appear, the second collects each pair's venues without disturbing
/// their relative order. Quadratic, which is fine at directory scale; a
/// hash map would lose the first-appearance ordering. City and state are
/// compared exactly -- differing case or whitespace means a different group.
pub fn group_by_city(venues: &[Venue]) -> Vec<CityGroup> {
    let mut keys: Vec<(String, String)> = Vec::new();
    for venue in venues {
        let key = (venue.city.clone(), venue.state.clone());
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys.into_iter()
        .map(|(city, state)| {
            let members = venues
                .iter()
                .filter(|v| v.city == city && v.state == state)
                .cloned()
                .collect();
            CityGroup {
                city,
                state,
                venues: members,
            }
        })
        .collect()
}

/// One show on a profile page, enriched with the display fields of the
/// entity on the other side of the booking.
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub partner_id: i64,
    pub partner_name: String,
    pub partner_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionedShows {
    pub past: Vec<ShowListing>,
    pub upcoming: Vec<ShowListing>,
}

/// Splits shows into past (strictly before `now`) and upcoming (strictly
/// after). A show starting exactly at `now` lands in neither bucket.
pub fn partition_shows(rows: Vec<ShowRow>, now: NaiveDateTime) -> PartitionedShows {
    let mut shows = PartitionedShows::default();
    for row in rows {
        if row.start_time < now {
            shows.past.push(show_listing(row));
        } else if row.start_time > now {
            shows.upcoming.push(show_listing(row));
        }
    }
    shows
}

fn show_listing(row: ShowRow) -> ShowListing {
    ShowListing {
        partner_id: row.partner_id,
        partner_name: row.partner_name,
        partner_image_link: row.partner_image_link.unwrap_or_default(),
        start_time: format_start_time(&row.start_time),
    }
}

pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format(TIME_FORMAT).to_string()
}

/// Flattened venue fields for the profile and edit pages; optional columns
/// become empty strings so the templates stay free of `Option` handling.
#[derive(Debug, Clone)]
pub struct VenueDetails {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

pub fn venue_details(venue: Venue, genres: Vec<String>) -> VenueDetails {
    VenueDetails {
        id: venue.id,
        name: venue.name,
        genres,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone.unwrap_or_default(),
        image_link: venue.image_link.unwrap_or_default(),
        facebook_link: venue.facebook_link.unwrap_or_default(),
        website: venue.website.unwrap_or_default(),
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description.unwrap_or_default(),
    }
}

#[derive(Debug, Clone)]
pub struct ArtistDetails {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

pub fn artist_details(artist: Artist, genres: Vec<String>) -> ArtistDetails {
    ArtistDetails {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone.unwrap_or_default(),
        image_link: artist.image_link.unwrap_or_default(),
        facebook_link: artist.facebook_link.unwrap_or_default(),
        website: artist.website.unwrap_or_default(),
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description.unwrap_or_default(),
    }
}

/// One entry in the venues-by-city overview or a search result page.
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A city/state heading plus its venue entries, ready to render.
#[derive(Debug, Clone)]
pub struct CityArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingEntry>,
}

/// One row of the full show listing, timestamps pre-formatted.
#[derive(Debug, Clone)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

pub fn show_entry(record: ShowRecord) -> ShowEntry {
    ShowEntry {
        venue_id: record.venue_id,
        venue_name: record.venue_name,
        artist_id: record.artist_id,
        artist_name: record.artist_name,
        artist_image_link: record.artist_image_link.unwrap_or_default(),
        start_time: format_start_time(&record.start_time),
    }
}
