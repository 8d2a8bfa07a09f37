use chrono::NaiveDateTime;

/// Storage format for show start times. Lexicographic order on this format
/// matches chronological order, which the store's SQL comparisons rely on.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A show joined with the entity on the other side of the booking: the
/// artist when listing a venue's shows, the venue when listing an artist's.
#[derive(Debug, Clone)]
pub struct ShowRow {
    pub partner_id: i64,
    pub partner_name: String,
    pub partner_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show joined with both its venue and its artist, for the full listing.
#[derive(Debug, Clone)]
pub struct ShowRecord {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}
