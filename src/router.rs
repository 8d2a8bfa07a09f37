use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{
    artist_page, artists_page, create_artist, create_show, create_venue, delete_venue,
    edit_artist_form, edit_venue_form, index, new_artist_form, new_show_form, new_venue_form,
    not_found, search_artists, search_venues, shows_page, update_artist, update_venue, venue_page,
    venues_page,
};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/venues", get(venues_page))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(new_venue_form).post(create_venue))
        .route("/venues/:venue_id", get(venue_page).delete(delete_venue))
        .route(
            "/venues/:venue_id/edit",
            get(edit_venue_form).post(update_venue),
        )
        .route("/artists", get(artists_page))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(new_artist_form).post(create_artist))
        .route("/artists/:artist_id", get(artist_page))
        .route(
            "/artists/:artist_id/edit",
            get(edit_artist_form).post(update_artist),
        )
        .route("/shows", get(shows_page))
        .route("/shows/create", get(new_show_form).post(create_show))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .with_state(state)
}
