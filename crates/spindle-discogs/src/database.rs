// SPDX-License-Identifier: GPL-3.0-or-later

//! Database endpoints.
//!
//! See <https://www.discogs.com/developers#page:database>.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::client::DiscogsClient;
use crate::error::{Resource, Result};
use crate::models::{
    Artist, Label, MasterRelease, ReleaseOptions, ReleaseResponse, SearchOptions, SearchResponse,
};
use crate::query::{to_query, QueryParams};

impl DiscogsClient {
    /// Fetch a release by ID.
    ///
    /// A 404 becomes [`DiscogsError::NotFound`](crate::DiscogsError::NotFound)
    /// carrying `release_id`. An empty body yields a default release.
    ///
    /// # Example
    /// ```no_run
    /// # use spindle_discogs::{CancellationToken, DiscogsClient, DiscogsConfig, ReleaseOptions};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DiscogsClient::new(DiscogsConfig::new("MyApp/1.0"))?;
    /// let cancel = CancellationToken::new();
    /// let release = client
    ///     .release(&cancel, 249504, &ReleaseOptions::default())
    ///     .await?;
    /// println!("{}", release.title);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, cancel, options))]
    pub async fn release(
        &self,
        cancel: &CancellationToken,
        release_id: u64,
        options: &ReleaseOptions,
    ) -> Result<ReleaseResponse> {
        let endpoint = format!("/releases/{release_id}");
        let params = to_query(options)?;
        self.lookup(cancel, Resource::Release, release_id, &endpoint, &params)
            .await
    }

    /// Fetch a master release by ID.
    #[instrument(skip(self, cancel))]
    pub async fn master_release(
        &self,
        cancel: &CancellationToken,
        master_id: u64,
    ) -> Result<MasterRelease> {
        let endpoint = format!("/masters/{master_id}");
        self.lookup(
            cancel,
            Resource::MasterRelease,
            master_id,
            &endpoint,
            &QueryParams::new(),
        )
        .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn artist(&self, cancel: &CancellationToken, artist_id: u64) -> Result<Artist> {
        let endpoint = format!("/artists/{artist_id}");
        self.lookup(
            cancel,
            Resource::Artist,
            artist_id,
            &endpoint,
            &QueryParams::new(),
        )
        .await
    }

    #[instrument(skip(self, cancel))]
    pub async fn label(&self, cancel: &CancellationToken, label_id: u64) -> Result<Label> {
        let endpoint = format!("/labels/{label_id}");
        self.lookup(
            cancel,
            Resource::Label,
            label_id,
            &endpoint,
            &QueryParams::new(),
        )
        .await
    }

    /// Search the database. Requires a consumer key and secret.
    ///
    /// # Example
    /// ```no_run
    /// # use spindle_discogs::{CancellationToken, DiscogsClient, DiscogsConfig, EntityType, SearchOptions};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = DiscogsConfig::new("MyApp/1.0").with_key_secret("key", "secret");
    /// let client = DiscogsClient::new(config)?;
    /// let options = SearchOptions::new("Nevermind").entity_type(EntityType::Release);
    /// let results = client.search(&CancellationToken::new(), &options).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, cancel))]
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let endpoint = "/database/search";
        let params = to_query(options)?;
        self.get(cancel, endpoint, &params, &HeaderMap::new())
            .await
            .map(Option::unwrap_or_default)
    }

    async fn lookup<T: DeserializeOwned + Default>(
        &self,
        cancel: &CancellationToken,
        resource: Resource,
        id: u64,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T> {
        self.get(cancel, endpoint, params, &HeaderMap::new())
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| e.not_found_as(resource, id))
    }
}
