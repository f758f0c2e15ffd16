//! Catalog listings: profiles, indicators, area types and areas.

use crate::output::{Options, banner, print_table};
use anyhow::Result;
use fingertips::{FingertipsClient, JsonSource};

/// List all profiles.
pub(crate) async fn profiles<S: JsonSource>(
    client: &FingertipsClient<S>,
    opts: &Options,
) -> Result<()> {
    banner("Profiles");

    let table = if opts.strict {
        client.try_profiles().await?
    } else {
        client.profiles().await
    };
    print_table(&table, opts)
}

/// List the indicators of one profile.
pub(crate) async fn indicators<S: JsonSource>(
    client: &FingertipsClient<S>,
    profile_id: i64,
    opts: &Options,
) -> Result<()> {
    banner(&format!("Indicators for profile {profile_id}"));

    let table = if opts.strict {
        client.try_profile_indicators(profile_id).await?
    } else {
        client.profile_indicators(profile_id).await
    };
    print_table(&table, opts)
}

/// List all area types.
pub(crate) async fn area_types<S: JsonSource>(
    client: &FingertipsClient<S>,
    opts: &Options,
) -> Result<()> {
    banner("Area Types");

    let table = if opts.strict {
        client.try_area_types().await?
    } else {
        client.area_types().await
    };
    print_table(&table, opts)
}

/// List the areas of one area type.
pub(crate) async fn areas<S: JsonSource>(
    client: &FingertipsClient<S>,
    area_type_id: i64,
    opts: &Options,
) -> Result<()> {
    banner(&format!("Areas of type {area_type_id}"));

    let table = if opts.strict {
        client.try_areas_for_type(area_type_id).await?
    } else {
        client.areas_for_type(area_type_id).await
    };
    print_table(&table, opts)
}
