use std::{env, time::Duration};

use geo_types::{Coord, LineString, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::MapboxError,
    provider::{DirectionsProvider, DirectionsRoute},
};

pub const MAPBOX_DIRECTIONS_API_URL: &str = "https://api.mapbox.com/directions/v5/mapbox/driving";
pub const MAPBOX_GEOCODE_API_URL: &str = "https://api.mapbox.com/search/geocode/v6/forward";

pub const MAPBOX_TOKEN_ENV_VAR: &str = "MAPBOX_TOKEN";
pub const MAPBOX_PUBLIC_TOKEN_ENV_VAR: &str = "NEXT_PUBLIC_MAPBOX_TOKEN";

#[derive(Debug, Clone)]
pub struct MapboxClientParams {
    pub access_token: String,
    /// Request timeout, the HTTP client default when `None`.
    pub timeout: Option<Duration>,
}

impl MapboxClientParams {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            timeout: None,
        }
    }

    /// Reads the token from `MAPBOX_TOKEN`, then `NEXT_PUBLIC_MAPBOX_TOKEN`.
    /// A missing or blank token means live lookups are not configured.
    pub fn from_env() -> Option<Self> {
        [MAPBOX_TOKEN_ENV_VAR, MAPBOX_PUBLIC_TOKEN_ENV_VAR]
            .into_iter()
            .filter_map(|key| env::var(key).ok())
            .map(|token| token.trim().to_owned())
            .find(|token| !token.is_empty())
            .map(Self::new)
    }
}

/// Place found by a forward geocode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Deserialize)]
struct MapboxRoute {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    /// GeoJSON when requested, an encoded polyline otherwise.
    geometry: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RouteGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Deserialize)]
struct GeocodeFeature {
    geometry: Option<GeocodeGeometry>,
    #[serde(default)]
    properties: GeocodeProperties,
}

#[derive(Deserialize)]
struct GeocodeGeometry {
    coordinates: Option<[f64; 2]>,
}

#[derive(Deserialize, Default)]
struct GeocodeProperties {
    name: Option<String>,
    #[serde(default)]
    context: GeocodeContext,
}

#[derive(Deserialize, Default)]
struct GeocodeContext {
    place: Option<GeocodePlace>,
}

#[derive(Deserialize)]
struct GeocodePlace {
    name: Option<String>,
}

fn parse_geometry(value: serde_json::Value) -> Result<LineString, MapboxError> {
    let geometry: RouteGeometry = serde_json::from_value(value)?;

    Ok(LineString::new(
        geometry
            .coordinates
            .into_iter()
            .map(|[x, y]| Coord { x, y })
            .collect(),
    ))
}

pub struct MapboxClient {
    params: MapboxClientParams,
    client: reqwest::Client,
}

impl MapboxClient {
    pub fn new(params: MapboxClientParams) -> Result<Self, MapboxError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            params,
            client: builder.build()?,
        })
    }

    pub fn from_env() -> Result<Self, MapboxError> {
        let params = MapboxClientParams::from_env().ok_or(MapboxError::NotConfigured)?;
        Self::new(params)
    }

    pub async fn fetch_directions(
        &self,
        from: Point,
        to: Point,
        with_geometry: bool,
    ) -> Result<DirectionsRoute, MapboxError> {
        let url = format!(
            "{}/{},{};{},{}",
            MAPBOX_DIRECTIONS_API_URL,
            from.x(),
            from.y(),
            to.x(),
            to.y()
        );

        let mut query = vec![("access_token", self.params.access_token.as_str())];
        if with_geometry {
            query.push(("geometries", "geojson"));
        }

        let response = self.client.get(url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!("MapboxApi: directions failed with {}", status);
            return Err(MapboxError::Api { status, message });
        }

        let body: DirectionsResponse = response.json().await?;
        let code = body.code.unwrap_or_default();

        let route = match body.routes.into_iter().next() {
            Some(route) if code == "Ok" => route,
            _ => return Err(MapboxError::NoRoute(code)),
        };

        debug!(
            "MapboxApi: route of {}m in {}s",
            route.distance, route.duration
        );

        let geometry = match route.geometry {
            Some(value) if with_geometry => Some(parse_geometry(value)?),
            _ => None,
        };

        Ok(DirectionsRoute::from_raw(
            route.distance,
            route.duration,
            geometry,
        ))
    }

    /// First French place matching `query`.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, MapboxError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let search = format!("{query}, France");
        let response = self
            .client
            .get(MAPBOX_GEOCODE_API_URL)
            .query(&[
                ("q", search.as_str()),
                ("access_token", self.params.access_token.as_str()),
                ("country", "fr"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MapboxError::Api { status, message });
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(first_result(body, query))
    }

    /// Like [`MapboxClient::geocode`], with every failure logged and turned
    /// into `None`.
    pub async fn try_geocode(&self, query: &str) -> Option<GeocodeResult> {
        match self.geocode(query).await {
            Ok(result) => result,
            Err(e) => {
                warn!("MapboxApi: geocoding {:?} failed: {}", query, e);
                None
            }
        }
    }
}

fn first_result(body: GeocodeResponse, query: &str) -> Option<GeocodeResult> {
    let feature = body.features.into_iter().next()?;
    let [lng, lat] = feature.geometry?.coordinates?;

    let properties = feature.properties;
    let name = properties
        .name
        .or_else(|| properties.context.place.and_then(|place| place.name))
        .unwrap_or_else(|| query.to_owned());

    Some(GeocodeResult { lat, lng, name })
}

impl DirectionsProvider for MapboxClient {
    async fn directions(
        &self,
        from: Point,
        to: Point,
        with_geometry: bool,
    ) -> Result<DirectionsRoute, MapboxError> {
        self.fetch_directions(from, to, with_geometry).await
    }
}
