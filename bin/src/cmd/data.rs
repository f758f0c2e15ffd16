//! Indicator data command implementation.

use crate::output::{Options, banner, print_table};
use anyhow::Result;
use fingertips::{FingertipsClient, JsonSource};

/// Fetch and print the values of one indicator at an area type.
pub(crate) async fn indicator_data<S: JsonSource>(
    client: &FingertipsClient<S>,
    indicator_id: i64,
    area_type_id: i64,
    parent_area_code: Option<&str>,
    opts: &Options,
) -> Result<()> {
    banner("Indicator Data");

    println!("Indicator: {}", indicator_id);
    println!("Area type: {}", area_type_id);
    match parent_area_code {
        Some(code) => println!("Parent:    {}", code),
        None => println!("Parent:    All areas"),
    }
    println!();

    let table = if opts.strict {
        client
            .try_data_for_indicator(indicator_id, area_type_id, parent_area_code)
            .await?
    } else {
        client
            .data_for_indicator(indicator_id, area_type_id, parent_area_code)
            .await
    };
    print_table(&table, opts)
}
