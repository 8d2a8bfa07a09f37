//! SQLite-backed store. One connection behind a mutex; each method acquires
//! it for the duration of a single request's operation. Writes that span
//! multiple statements run inside a `rusqlite::Transaction`, which rolls
//! back on drop unless committed, so no failure path can leak partial rows.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::domain::{Artist, ShowRecord, ShowRow, Venue, TIME_FORMAT};
use crate::error::{AppError, Result};
use crate::forms::{ArtistForm, NewShow, VenueForm};

const SCHEMA: &str = include_str!("../migrations/001_create_tables.sql");

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        info!("Database schema ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // Venues

    pub fn all_venues(&self) -> Result<Vec<Venue>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", VENUE_SELECT))?;
        let venues = stmt
            .query_map([], venue_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(venues)
    }

    pub fn venue(&self, venue_id: i64) -> Result<Option<Venue>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", VENUE_SELECT))?;
        let mut rows = stmt.query_map(params![venue_id], venue_from_row)?;
        rows.next().transpose().map_err(AppError::from)
    }

    /// Case-insensitive substring match on venue name. An empty term
    /// matches every venue.
    pub fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{} WHERE lower(name) LIKE '%' || lower(?1) || '%' ORDER BY id",
            VENUE_SELECT
        ))?;
        let venues = stmt
            .query_map(params![term], venue_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(venues)
    }

    pub fn count_venues_matching(&self, term: &str) -> Result<i64> {
        let conn = self.conn();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM venues WHERE lower(name) LIKE '%' || lower(?1) || '%'",
            params![term],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn venue_genres(&self, venue_id: i64) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT name FROM venue_genres WHERE venue_id = ?1 ORDER BY id")?;
        let genres = stmt
            .query_map(params![venue_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genres)
    }

    /// Inserts a venue and its genre tags as one transaction. The genre rows
    /// reference the id returned by the venue insert itself, never a
    /// separate "latest row" lookup, so a concurrent creation cannot be
    /// misattributed.
    pub fn create_venue(&self, form: &VenueForm) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link)
             VALUES (?1, ?2, ?3, ?4, ?5, '', ?6)",
            params![
                form.name,
                form.city,
                form.state,
                form.address,
                form.phone,
                form.facebook_link
            ],
        )?;
        let venue_id = tx.last_insert_rowid();
        for genre in &form.genres {
            tx.execute(
                "INSERT INTO venue_genres (name, venue_id) VALUES (?1, ?2)",
                params![genre, venue_id],
            )?;
        }
        tx.commit()?;

        info!("Created venue '{}' with id {}", form.name, venue_id);
        Ok(venue_id)
    }

    // Artists

    pub fn all_artists(&self) -> Result<Vec<Artist>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", ARTIST_SELECT))?;
        let artists = stmt
            .query_map([], artist_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(artists)
    }

    pub fn artist(&self, artist_id: i64) -> Result<Option<Artist>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", ARTIST_SELECT))?;
        let mut rows = stmt.query_map(params![artist_id], artist_from_row)?;
        rows.next().transpose().map_err(AppError::from)
    }

    pub fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{} WHERE lower(name) LIKE '%' || lower(?1) || '%' ORDER BY id",
            ARTIST_SELECT
        ))?;
        let artists = stmt
            .query_map(params![term], artist_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(artists)
    }

    pub fn count_artists_matching(&self, term: &str) -> Result<i64> {
        let conn = self.conn();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM artists WHERE lower(name) LIKE '%' || lower(?1) || '%'",
            params![term],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn artist_genres(&self, artist_id: i64) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT name FROM artist_genres WHERE artist_id = ?1 ORDER BY id")?;
        let genres = stmt
            .query_map(params![artist_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genres)
    }

    pub fn create_artist(&self, form: &ArtistForm) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO artists (name, city, state, phone, image_link, facebook_link)
             VALUES (?1, ?2, ?3, ?4, '', ?5)",
            params![
                form.name,
                form.city,
                form.state,
                form.phone,
                form.facebook_link
            ],
        )?;
        let artist_id = tx.last_insert_rowid();
        for genre in &form.genres {
            tx.execute(
                "INSERT INTO artist_genres (name, artist_id) VALUES (?1, ?2)",
                params![genre, artist_id],
            )?;
        }
        tx.commit()?;

        info!("Created artist '{}' with id {}", form.name, artist_id);
        Ok(artist_id)
    }

    // Shows

    pub fn create_show(&self, show: &NewShow) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3)",
            params![
                show.venue_id,
                show.artist_id,
                show.start_time.format(TIME_FORMAT).to_string()
            ],
        )?;
        let show_id = conn.last_insert_rowid();
        info!(
            "Created show {} (venue {}, artist {})",
            show_id, show.venue_id, show.artist_id
        );
        Ok(show_id)
    }

    /// A venue's shows joined with each performing artist's display fields.
    pub fn shows_at_venue(&self, venue_id: i64) -> Result<Vec<ShowRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT a.id, a.name, a.image_link, s.start_time
             FROM shows s JOIN artists a ON a.id = s.artist_id
             WHERE s.venue_id = ?1 ORDER BY s.start_time",
        )?;
        let rows = stmt
            .query_map(params![venue_id], show_row_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Loaded {} shows for venue {}", rows.len(), venue_id);
        Ok(rows)
    }

    /// An artist's shows joined with each hosting venue's display fields.
    pub fn shows_by_artist(&self, artist_id: i64) -> Result<Vec<ShowRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT v.id, v.name, v.image_link, s.start_time
             FROM shows s JOIN venues v ON v.id = s.venue_id
             WHERE s.artist_id = ?1 ORDER BY s.start_time",
        )?;
        let rows = stmt
            .query_map(params![artist_id], show_row_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Loaded {} shows for artist {}", rows.len(), artist_id);
        Ok(rows)
    }

    // Past/upcoming counts are query-level aggregates, issued separately
    // from the list queries. Lexicographic comparison on the stored text
    // matches chronological order for TIME_FORMAT.

    pub fn past_show_count_for_venue(&self, venue_id: i64, now: NaiveDateTime) -> Result<i64> {
        self.show_count(
            "SELECT COUNT(*) FROM shows WHERE venue_id = ?1 AND start_time < ?2",
            venue_id,
            now,
        )
    }

    pub fn upcoming_show_count_for_venue(&self, venue_id: i64, now: NaiveDateTime) -> Result<i64> {
        self.show_count(
            "SELECT COUNT(*) FROM shows WHERE venue_id = ?1 AND start_time > ?2",
            venue_id,
            now,
        )
    }

    pub fn past_show_count_for_artist(&self, artist_id: i64, now: NaiveDateTime) -> Result<i64> {
        self.show_count(
            "SELECT COUNT(*) FROM shows WHERE artist_id = ?1 AND start_time < ?2",
            artist_id,
            now,
        )
    }

    pub fn upcoming_show_count_for_artist(&self, artist_id: i64, now: NaiveDateTime) -> Result<i64> {
        self.show_count(
            "SELECT COUNT(*) FROM shows WHERE artist_id = ?1 AND start_time > ?2",
            artist_id,
            now,
        )
    }

    fn show_count(&self, sql: &str, owner_id: i64, now: NaiveDateTime) -> Result<i64> {
        let conn = self.conn();
        let count = conn.query_row(
            sql,
            params![owner_id, now.format(TIME_FORMAT).to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Every show joined across venue and artist, for the full listing.
    pub fn all_shows(&self) -> Result<Vec<ShowRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             JOIN artists a ON a.id = s.artist_id
             ORDER BY s.start_time",
        )?;
        let records = stmt
            .query_map([], |row| {
                Ok(ShowRecord {
                    venue_id: row.get(0)?,
                    venue_name: row.get(1)?,
                    artist_id: row.get(2)?,
                    artist_name: row.get(3)?,
                    artist_image_link: row.get(4)?,
                    start_time: parse_stored_time(row, 5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

const VENUE_SELECT: &str = "SELECT id, name, city, state, address, phone, image_link, \
     facebook_link, website, seeking_talent, seeking_description FROM venues";

const ARTIST_SELECT: &str = "SELECT id, name, city, state, phone, image_link, \
     facebook_link, website, seeking_venue, seeking_description FROM artists";

fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        image_link: row.get(6)?,
        facebook_link: row.get(7)?,
        website: row.get(8)?,
        seeking_talent: row.get(9)?,
        seeking_description: row.get(10)?,
    })
}

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        phone: row.get(4)?,
        image_link: row.get(5)?,
        facebook_link: row.get(6)?,
        website: row.get(7)?,
        seeking_venue: row.get(8)?,
        seeking_description: row.get(9)?,
    })
}

fn show_row_from_row(row: &Row<'_>) -> rusqlite::Result<ShowRow> {
    Ok(ShowRow {
        partner_id: row.get(0)?,
        partner_name: row.get(1)?,
        partner_image_link: row.get(2)?,
        start_time: parse_stored_time(row, 3)?,
    })
}

fn parse_stored_time(row: &Row<'_>, index: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(index)?;
    NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}
