use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    db::listingdb::ListingExt,
    dtos::listingdtos::{
        HouseDetailDto, HouseFilterDto, LandDetailDto, LandFilterDto, ListingCardDto,
    },
    error::HttpError,
    models::listingmodel::{HouseWithMedia, LandWithMedia},
    AppState,
};

/// Home-page highlight section: up to 3 featured listings per catalog,
/// 6 overall, houses ahead of land parcels.
const FEATURED_PER_CATALOG: i64 = 3;
const FEATURED_MAX: usize = 6;

pub fn listing_handler() -> Router {
    Router::new()
        .route("/houses", get(list_houses))
        .route("/houses/:slug", get(get_house_by_slug))
        .route("/lands", get(list_lands))
        .route("/lands/:slug", get(get_land_by_slug))
        .route("/featured", get(get_featured_listings))
}

pub async fn list_houses(
    Query(filters): Query<HouseFilterDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    // A datastore failure degrades to an empty result set; the page shows
    // "no results" instead of an error.
    let listings = match app_state
        .db_client
        .get_published_houses(filters.to_search_filters())
        .await
    {
        Ok(listings) => listings,
        Err(err) => {
            tracing::error!("failed to fetch houses: {err}");
            Vec::new()
        }
    };

    let cards: Vec<ListingCardDto> = listings.iter().map(ListingCardDto::from_house).collect();
    let total = cards.len();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": cards,
            "total": total
        }
    })))
}

pub async fn get_house_by_slug(
    Path(slug): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = match app_state.db_client.get_house_by_slug(&slug).await {
        Ok(Some(listing)) => listing,
        Ok(None) => return Err(HttpError::not_found("House not found")),
        Err(err) => {
            tracing::error!("failed to fetch house {slug}: {err}");
            return Err(HttpError::not_found("House not found"));
        }
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listing": HouseDetailDto::from_listing(&listing)
        }
    })))
}

pub async fn list_lands(
    Query(filters): Query<LandFilterDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listings = match app_state
        .db_client
        .get_published_lands(filters.to_search_filters())
        .await
    {
        Ok(listings) => listings,
        Err(err) => {
            tracing::error!("failed to fetch land parcels: {err}");
            Vec::new()
        }
    };

    let cards: Vec<ListingCardDto> = listings.iter().map(ListingCardDto::from_land).collect();
    let total = cards.len();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": cards,
            "total": total
        }
    })))
}

pub async fn get_land_by_slug(
    Path(slug): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = match app_state.db_client.get_land_by_slug(&slug).await {
        Ok(Some(listing)) => listing,
        Ok(None) => return Err(HttpError::not_found("Land parcel not found")),
        Err(err) => {
            tracing::error!("failed to fetch land parcel {slug}: {err}");
            return Err(HttpError::not_found("Land parcel not found"));
        }
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listing": LandDetailDto::from_listing(&listing)
        }
    })))
}

pub async fn get_featured_listings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let houses = match app_state
        .db_client
        .get_featured_houses(FEATURED_PER_CATALOG)
        .await
    {
        Ok(houses) => houses,
        Err(err) => {
            tracing::error!("failed to fetch featured houses: {err}");
            Vec::new()
        }
    };

    let lands = match app_state
        .db_client
        .get_featured_lands(FEATURED_PER_CATALOG)
        .await
    {
        Ok(lands) => lands,
        Err(err) => {
            tracing::error!("failed to fetch featured land parcels: {err}");
            Vec::new()
        }
    };

    let cards = merge_featured(&houses, &lands, FEATURED_MAX);
    let total = cards.len();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": cards,
            "total": total
        }
    })))
}

/// Houses first, then land parcels, truncated to the section cap. Each
/// input is already ordered by publication recency.
fn merge_featured(
    houses: &[HouseWithMedia],
    lands: &[LandWithMedia],
    max: usize,
) -> Vec<ListingCardDto> {
    houses
        .iter()
        .map(ListingCardDto::from_house)
        .chain(lands.iter().map(ListingCardDto::from_land))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sqlx::types::Json;

    use super::*;
    use crate::models::listingmodel::{House, Land, ListingStatus};

    fn house(id: i64, slug: &str) -> HouseWithMedia {
        HouseWithMedia {
            house: House {
                id,
                slug: slug.to_string(),
                title: format!("Casa {id}"),
                description: None,
                maps_link: None,
                price_cents: 650_000_000,
                currency: "MXN".to_string(),
                bedrooms: Some(3),
                bathrooms: Some(2),
                parking: Some(2),
                floors: None,
                lot_m2: None,
                built_m2: None,
                built_year: None,
                lat: None,
                lng: None,
                address: None,
                services: Json(HashMap::new()),
                amenities: Json(Vec::new()),
                tags: Json(Vec::new()),
                featured: true,
                status: ListingStatus::Published,
                published_at: None,
                created_at: None,
                updated_at: None,
            },
            media: Vec::new(),
        }
    }

    fn land(id: i64, slug: &str) -> LandWithMedia {
        LandWithMedia {
            land: Land {
                id,
                slug: slug.to_string(),
                title: format!("Terreno {id}"),
                description: None,
                maps_link: None,
                price_cents: 120_000_000,
                currency: "MXN".to_string(),
                surface_m2: Some(350.0),
                lat: None,
                lng: None,
                address: None,
                services: Json(HashMap::new()),
                tags: Json(Vec::new()),
                featured: true,
                status: ListingStatus::Published,
                published_at: None,
                created_at: None,
                updated_at: None,
            },
            media: Vec::new(),
        }
    }

    #[test]
    fn merge_keeps_houses_first_and_caps_the_section() {
        let houses = vec![house(1, "c1"), house(2, "c2"), house(3, "c3")];
        let lands = vec![land(10, "t1"), land(11, "t2"), land(12, "t3")];

        let merged = merge_featured(&houses, &lands, 6);
        assert_eq!(merged.len(), 6);
        assert!(merged[..3].iter().all(|c| c.kind == "house"));
        assert!(merged[3..].iter().all(|c| c.kind == "land"));

        let merged = merge_featured(&houses, &lands, 4);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[3].kind, "land");
        assert_eq!(merged[3].id, 10);
    }

    #[test]
    fn merge_with_one_empty_catalog_keeps_the_other() {
        let lands = vec![land(10, "t1"), land(11, "t2")];
        let merged = merge_featured(&[], &lands, 6);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|c| c.kind == "land"));
    }

    #[test]
    fn media_less_cards_fall_back_to_the_placeholder() {
        let card = ListingCardDto::from_house(&house(1, "c1"));
        assert_eq!(card.display_mode, "placeholder");
        assert_eq!(
            card.cover_image_url.as_deref(),
            Some(crate::service::media::PLACEHOLDER_URL)
        );
        assert_eq!(card.preview_video_url, None);
        assert_eq!(card.price_display, "$6,500,000.00 MXN");
    }
}
