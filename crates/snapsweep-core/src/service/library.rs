//! Loading the library into categories and triage passes.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::asset::{AssetId, MediaKind, PermissionState};
use crate::category::{Category, CategorySummary, enumerate_categories};
use crate::config::TriageConfig;
use crate::provider::MediaProvider;
use crate::session::TriageSession;
use crate::{Error, Result};

/// Make sure photo access is granted, prompting if it is not.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] if access is still missing after
/// the prompt.
pub async fn ensure_access<P: MediaProvider>(provider: &P) -> Result<PermissionState> {
    let current = provider.query_access().await;
    if current.is_granted() {
        return Ok(current);
    }

    let answer = provider.request_access().await.after_request();
    if answer.is_granted() {
        info!("Photo library access granted");
        Ok(answer)
    } else {
        warn!(status = %answer, "Photo library access denied");
        Err(Error::PermissionDenied(answer))
    }
}

/// List the categories offered on the home screen.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, access is denied or
/// the provider fails to list photos.
pub async fn load_categories<P: MediaProvider>(
    provider: &P,
    config: &TriageConfig,
) -> Result<Vec<CategorySummary>> {
    config.validate().map_err(Error::Config)?;
    ensure_access(provider).await?;

    let photos = provider
        .list_assets(MediaKind::Photo, config.list_limit)
        .await?;
    Ok(enumerate_categories(&photos, config))
}

/// Open `category` in `session`, returning the size of the working set.
///
/// The photos are listed fresh from the provider and filtered once. If the
/// session already holds this category its position is kept. A random
/// sample is not redrawn in that case: the session keeps its sample, minus
/// photos the provider no longer lists.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, access is denied or
/// the provider fails to list photos. The session is left untouched.
pub async fn open_category<P: MediaProvider>(
    provider: &P,
    session: &mut TriageSession,
    category: Category,
    config: &TriageConfig,
) -> Result<usize> {
    config.validate().map_err(Error::Config)?;
    ensure_access(provider).await?;

    let photos = provider
        .list_assets(MediaKind::Photo, config.list_limit)
        .await?;
    let working_set = if session.category() == Some(category)
        && matches!(category, Category::Random { .. })
        && !session.working_set().is_empty()
    {
        let listed: HashSet<&AssetId> = photos.iter().map(|a| &a.id).collect();
        debug!(%category, "Keeping drawn sample");
        session
            .working_set()
            .iter()
            .filter(|asset| listed.contains(&asset.id))
            .cloned()
            .collect()
    } else {
        category.filter(&photos)
    };
    let count = working_set.len();

    info!(%category, photos = count, "Opened category");
    session.load(working_set, category);
    Ok(count)
}
