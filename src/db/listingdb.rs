use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    db::db::DBClient,
    models::listingmodel::{House, HouseWithMedia, Land, LandWithMedia, ListingStatus, Media},
};

/// Resolved range predicates for a house search. Bounds are half-open on
/// the low side and inclusive on the high side, matching the price-band
/// boundaries (`low` is "up to and including" its ceiling).
#[derive(Debug, Default, Clone, Copy)]
pub struct HouseSearchFilters {
    pub price_over_cents: Option<i64>,
    pub price_up_to_cents: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub min_parking: Option<i32>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LandSearchFilters {
    pub price_over_cents: Option<i64>,
    pub price_up_to_cents: Option<i64>,
    pub surface_over_m2: Option<f64>,
    pub surface_up_to_m2: Option<f64>,
}

const HOUSE_COLUMNS: &str = "id, slug, title, description, maps_link, price_cents, currency, \
     bedrooms, bathrooms, parking, floors, lot_m2, built_m2, built_year, \
     lat, lng, address, services, amenities, tags, \
     featured, status, published_at, created_at, updated_at";

const LAND_COLUMNS: &str = "id, slug, title, description, maps_link, price_cents, currency, \
     surface_m2, lat, lng, address, services, tags, \
     featured, status, published_at, created_at, updated_at";

#[async_trait]
pub trait ListingExt {
    /// Published houses matching the filters, featured first, most
    /// recently published first, each with its media attached.
    async fn get_published_houses(
        &self,
        filters: HouseSearchFilters,
    ) -> Result<Vec<HouseWithMedia>, sqlx::Error>;

    /// Single published house by slug. A draft or archived slug behaves
    /// exactly like a nonexistent one.
    async fn get_house_by_slug(&self, slug: &str) -> Result<Option<HouseWithMedia>, sqlx::Error>;

    async fn get_featured_houses(&self, limit: i64) -> Result<Vec<HouseWithMedia>, sqlx::Error>;

    async fn get_published_lands(
        &self,
        filters: LandSearchFilters,
    ) -> Result<Vec<LandWithMedia>, sqlx::Error>;

    async fn get_land_by_slug(&self, slug: &str) -> Result<Option<LandWithMedia>, sqlx::Error>;

    async fn get_featured_lands(&self, limit: i64) -> Result<Vec<LandWithMedia>, sqlx::Error>;
}

impl DBClient {
    /// Media rows for a set of listings, keyed by owner, ordered by
    /// sort_order with ties broken by insertion order.
    async fn media_for(
        &self,
        table: &str,
        fk_column: &str,
        listing_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Media>>, sqlx::Error> {
        if listing_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT id, {fk} AS listing_id, url, alt, sort_order \
             FROM {table} \
             WHERE {fk} = ANY($1) \
             ORDER BY sort_order, id",
            fk = fk_column,
            table = table,
        );

        let rows = sqlx::query_as::<_, Media>(&sql)
            .bind(listing_ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i64, Vec<Media>> = HashMap::new();
        for media in rows {
            grouped.entry(media.listing_id).or_default().push(media);
        }

        Ok(grouped)
    }

    async fn attach_house_media(
        &self,
        houses: Vec<House>,
    ) -> Result<Vec<HouseWithMedia>, sqlx::Error> {
        let ids: Vec<i64> = houses.iter().map(|h| h.id).collect();
        let mut media = self.media_for("house_media", "house_id", &ids).await?;

        Ok(houses
            .into_iter()
            .map(|house| {
                let media = media.remove(&house.id).unwrap_or_default();
                HouseWithMedia { house, media }
            })
            .collect())
    }

    async fn attach_land_media(&self, lands: Vec<Land>) -> Result<Vec<LandWithMedia>, sqlx::Error> {
        let ids: Vec<i64> = lands.iter().map(|l| l.id).collect();
        let mut media = self.media_for("land_media", "land_id", &ids).await?;

        Ok(lands
            .into_iter()
            .map(|land| {
                let media = media.remove(&land.id).unwrap_or_default();
                LandWithMedia { land, media }
            })
            .collect())
    }
}

#[async_trait]
impl ListingExt for DBClient {
    async fn get_published_houses(
        &self,
        filters: HouseSearchFilters,
    ) -> Result<Vec<HouseWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {HOUSE_COLUMNS} \
             FROM houses \
             WHERE status = $1 \
             AND ($2::bigint IS NULL OR price_cents > $2) \
             AND ($3::bigint IS NULL OR price_cents <= $3) \
             AND ($4::int IS NULL OR bedrooms >= $4) \
             AND ($5::int IS NULL OR bathrooms >= $5) \
             AND ($6::int IS NULL OR parking >= $6) \
             ORDER BY featured DESC, published_at DESC NULLS LAST"
        );

        let houses = sqlx::query_as::<_, House>(&sql)
            .bind(ListingStatus::Published)
            .bind(filters.price_over_cents)
            .bind(filters.price_up_to_cents)
            .bind(filters.min_bedrooms)
            .bind(filters.min_bathrooms)
            .bind(filters.min_parking)
            .fetch_all(&self.pool)
            .await?;

        self.attach_house_media(houses).await
    }

    async fn get_house_by_slug(&self, slug: &str) -> Result<Option<HouseWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {HOUSE_COLUMNS} \
             FROM houses \
             WHERE slug = $1 AND status = $2"
        );

        let house = sqlx::query_as::<_, House>(&sql)
            .bind(slug)
            .bind(ListingStatus::Published)
            .fetch_optional(&self.pool)
            .await?;

        match house {
            Some(house) => {
                let mut with_media = self.attach_house_media(vec![house]).await?;
                Ok(with_media.pop())
            }
            None => Ok(None),
        }
    }

    async fn get_featured_houses(&self, limit: i64) -> Result<Vec<HouseWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {HOUSE_COLUMNS} \
             FROM houses \
             WHERE status = $1 AND featured = TRUE \
             ORDER BY published_at DESC NULLS LAST \
             LIMIT $2"
        );

        let houses = sqlx::query_as::<_, House>(&sql)
            .bind(ListingStatus::Published)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        self.attach_house_media(houses).await
    }

    async fn get_published_lands(
        &self,
        filters: LandSearchFilters,
    ) -> Result<Vec<LandWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {LAND_COLUMNS} \
             FROM lands \
             WHERE status = $1 \
             AND ($2::bigint IS NULL OR price_cents > $2) \
             AND ($3::bigint IS NULL OR price_cents <= $3) \
             AND ($4::double precision IS NULL OR surface_m2 > $4) \
             AND ($5::double precision IS NULL OR surface_m2 <= $5) \
             ORDER BY featured DESC, published_at DESC NULLS LAST"
        );

        let lands = sqlx::query_as::<_, Land>(&sql)
            .bind(ListingStatus::Published)
            .bind(filters.price_over_cents)
            .bind(filters.price_up_to_cents)
            .bind(filters.surface_over_m2)
            .bind(filters.surface_up_to_m2)
            .fetch_all(&self.pool)
            .await?;

        self.attach_land_media(lands).await
    }

    async fn get_land_by_slug(&self, slug: &str) -> Result<Option<LandWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {LAND_COLUMNS} \
             FROM lands \
             WHERE slug = $1 AND status = $2"
        );

        let land = sqlx::query_as::<_, Land>(&sql)
            .bind(slug)
            .bind(ListingStatus::Published)
            .fetch_optional(&self.pool)
            .await?;

        match land {
            Some(land) => {
                let mut with_media = self.attach_land_media(vec![land]).await?;
                Ok(with_media.pop())
            }
            None => Ok(None),
        }
    }

    async fn get_featured_lands(&self, limit: i64) -> Result<Vec<LandWithMedia>, sqlx::Error> {
        let sql = format!(
            "SELECT {LAND_COLUMNS} \
             FROM lands \
             WHERE status = $1 AND featured = TRUE \
             ORDER BY published_at DESC NULLS LAST \
             LIMIT $2"
        );

        let lands = sqlx::query_as::<_, Land>(&sql)
            .bind(ListingStatus::Published)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        self.attach_land_media(lands).await
    }
}
