use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use chrono::Local;
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::forms::{ArtistForm, SearchForm, ShowForm, VenueForm};
use crate::state::AppState;
use crate::templates::{
    ArtistTemplate, ArtistsTemplate, EditArtistTemplate, EditVenueTemplate, HomeTemplate,
    NewArtistTemplate, NewShowTemplate, NewVenueTemplate, SearchArtistsTemplate,
    SearchVenuesTemplate, ShowsTemplate, VenueTemplate, VenuesTemplate,
};
use crate::views::{self, CityArea, ListingEntry};

fn render<T: Template>(template: T) -> Result<Response> {
    Ok(Html(template.render()?).into_response())
}

/// Write failures land back on the home page with a notice, status 200.
fn home_with_flash(message: String) -> Result<Response> {
    render(HomeTemplate {
        flash: Some(message),
    })
}

pub async fn index() -> Result<Response> {
    render(HomeTemplate { flash: None })
}

//  Venues

pub async fn venues_page(State(state): State<AppState>) -> Result<Response> {
    let venues = state.store.all_venues()?;
    let now = Local::now().naive_local();

    let mut areas = Vec::new();
    for group in views::group_by_city(&venues) {
        let mut entries = Vec::with_capacity(group.venues.len());
        for venue in &group.venues {
            entries.push(ListingEntry {
                id: venue.id,
                name: venue.name.clone(),
                num_upcoming_shows: state.store.upcoming_show_count_for_venue(venue.id, now)?,
            });
        }
        areas.push(CityArea {
            city: group.city,
            state: group.state,
            venues: entries,
        });
    }

    render(VenuesTemplate { areas })
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response> {
    let count = state.store.count_venues_matching(&form.search_term)?;
    let matches = state.store.search_venues(&form.search_term)?;
    let now = Local::now().naive_local();

    let mut results = Vec::with_capacity(matches.len());
    for venue in matches {
        results.push(ListingEntry {
            num_upcoming_shows: state.store.upcoming_show_count_for_venue(venue.id, now)?,
            id: venue.id,
            name: venue.name,
        });
    }

    render(SearchVenuesTemplate {
        search_term: form.search_term,
        count,
        results,
    })
}

pub async fn venue_page(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> Result<Response> {
    let venue = state
        .store
        .venue(venue_id)?
        .ok_or(AppError::NotFound("Venue"))?;
    let genres = state.store.venue_genres(venue_id)?;

    // One evaluation instant for both the counts and the partition.
    let now = Local::now().naive_local();
    let past_shows_count = state.store.past_show_count_for_venue(venue_id, now)?;
    let upcoming_shows_count = state.store.upcoming_show_count_for_venue(venue_id, now)?;
    let shows = views::partition_shows(state.store.shows_at_venue(venue_id)?, now);

    render(VenueTemplate {
        venue: views::venue_details(venue, genres),
        past_shows: shows.past,
        upcoming_shows: shows.upcoming,
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn new_venue_form() -> Result<Response> {
    render(NewVenueTemplate)
}

pub async fn create_venue(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> Result<Response> {
    match form.validate().and_then(|_| state.store.create_venue(&form)) {
        Ok(venue_id) => {
            info!("Venue '{}' listed as {}", form.name, venue_id);
            home_with_flash(format!("Venue {} was successfully listed!", form.name))
        }
        Err(err) => {
            error!("Failed to create venue '{}': {}", form.name, err);
            home_with_flash(format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            ))
        }
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> Result<Response> {
    let venue = state
        .store
        .venue(venue_id)?
        .ok_or(AppError::NotFound("Venue"))?;
    let genres = state.store.venue_genres(venue_id)?;
    render(EditVenueTemplate {
        venue: views::venue_details(venue, genres),
    })
}

// Updating a venue is not supported yet; the form posts here and we bounce
// straight back to the profile page.
pub async fn update_venue(Path(venue_id): Path<i64>) -> Redirect {
    warn!("Venue update requested for {} but updates are not supported", venue_id);
    Redirect::to(&format!("/venues/{}", venue_id))
}

pub async fn delete_venue(Path(venue_id): Path<i64>) -> Redirect {
    warn!("Venue deletion requested for {} but deletion is not supported", venue_id);
    Redirect::to("/")
}

//  Artists

pub async fn artists_page(State(state): State<AppState>) -> Result<Response> {
    let artists = state.store.all_artists()?;
    let now = Local::now().naive_local();

    let mut entries = Vec::with_capacity(artists.len());
    for artist in artists {
        entries.push(ListingEntry {
            num_upcoming_shows: state.store.upcoming_show_count_for_artist(artist.id, now)?,
            id: artist.id,
            name: artist.name,
        });
    }

    render(ArtistsTemplate { artists: entries })
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response> {
    let count = state.store.count_artists_matching(&form.search_term)?;
    let matches = state.store.search_artists(&form.search_term)?;
    let now = Local::now().naive_local();

    let mut results = Vec::with_capacity(matches.len());
    for artist in matches {
        results.push(ListingEntry {
            num_upcoming_shows: state.store.upcoming_show_count_for_artist(artist.id, now)?,
            id: artist.id,
            name: artist.name,
        });
    }

    render(SearchArtistsTemplate {
        search_term: form.search_term,
        count,
        results,
    })
}

pub async fn artist_page(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> Result<Response> {
    let artist = state
        .store
        .artist(artist_id)?
        .ok_or(AppError::NotFound("Artist"))?;
    let genres = state.store.artist_genres(artist_id)?;

    let now = Local::now().naive_local();
    let past_shows_count = state.store.past_show_count_for_artist(artist_id, now)?;
    let upcoming_shows_count = state.store.upcoming_show_count_for_artist(artist_id, now)?;
    let shows = views::partition_shows(state.store.shows_by_artist(artist_id)?, now);

    render(ArtistTemplate {
        artist: views::artist_details(artist, genres),
        past_shows: shows.past,
        upcoming_shows: shows.upcoming,
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn new_artist_form() -> Result<Response> {
    render(NewArtistTemplate)
}

pub async fn create_artist(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Result<Response> {
    match form.validate().and_then(|_| state.store.create_artist(&form)) {
        Ok(artist_id) => {
            info!("Artist '{}' listed as {}", form.name, artist_id);
            home_with_flash(format!("Artist {} was successfully listed!", form.name))
        }
        Err(err) => {
            error!("Failed to create artist '{}': {}", form.name, err);
            home_with_flash(format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            ))
        }
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> Result<Response> {
    let artist = state
        .store
        .artist(artist_id)?
        .ok_or(AppError::NotFound("Artist"))?;
    let genres = state.store.artist_genres(artist_id)?;
    render(EditArtistTemplate {
        artist: views::artist_details(artist, genres),
    })
}

pub async fn update_artist(Path(artist_id): Path<i64>) -> Redirect {
    warn!("Artist update requested for {} but updates are not supported", artist_id);
    Redirect::to(&format!("/artists/{}", artist_id))
}

//  Shows

pub async fn shows_page(State(state): State<AppState>) -> Result<Response> {
    let shows = state
        .store
        .all_shows()?
        .into_iter()
        .map(views::show_entry)
        .collect();
    render(ShowsTemplate { shows })
}

pub async fn new_show_form() -> Result<Response> {
    render(NewShowTemplate)
}

pub async fn create_show(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Result<Response> {
    match form.validate().and_then(|show| state.store.create_show(&show)) {
        Ok(_) => home_with_flash("Show was successfully listed!".to_string()),
        Err(err) => {
            error!("Failed to create show: {}", err);
            home_with_flash("An error occurred. Show could not be listed.".to_string())
        }
    }
}

//  Errors

pub async fn not_found() -> Response {
    AppError::NotFound("Page").into_response()
}
