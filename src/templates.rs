use askama::Template;

use crate::views::{
    ArtistDetails, CityArea, ListingEntry, ShowEntry, ShowListing, VenueDetails,
};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<CityArea>,
}

#[derive(Template)]
#[template(path = "artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<ListingEntry>,
}

#[derive(Template)]
#[template(path = "search_venues.html")]
pub struct SearchVenuesTemplate {
    pub search_term: String,
    pub count: i64,
    pub results: Vec<ListingEntry>,
}

#[derive(Template)]
#[template(path = "search_artists.html")]
pub struct SearchArtistsTemplate {
    pub search_term: String,
    pub count: i64,
    pub results: Vec<ListingEntry>,
}

#[derive(Template)]
#[template(path = "venue.html")]
pub struct VenueTemplate {
    pub venue: VenueDetails,
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: i64,
    pub upcoming_shows_count: i64,
}

#[derive(Template)]
#[template(path = "artist.html")]
pub struct ArtistTemplate {
    pub artist: ArtistDetails,
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: i64,
    pub upcoming_shows_count: i64,
}

#[derive(Template)]
#[template(path = "shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowEntry>,
}

#[derive(Template)]
#[template(path = "new_venue.html")]
pub struct NewVenueTemplate;

#[derive(Template)]
#[template(path = "new_artist.html")]
pub struct NewArtistTemplate;

#[derive(Template)]
#[template(path = "new_show.html")]
pub struct NewShowTemplate;

#[derive(Template)]
#[template(path = "edit_venue.html")]
pub struct EditVenueTemplate {
    pub venue: VenueDetails,
}

#[derive(Template)]
#[template(path = "edit_artist.html")]
pub struct EditArtistTemplate {
    pub artist: ArtistDetails,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate;
