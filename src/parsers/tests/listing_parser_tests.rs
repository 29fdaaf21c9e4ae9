use crate::parsers::{MissingField, listing};

const FULL_LISTING: &str = r##"<html><body>
  <div class="Header_details__nRVNP"><a href="#map">Main St 5, Amsterdam</a></div>
  <div class="Overview_root__WQi2M">
    <h6>€ 650</h6>
    <h6>14 m2</h6>
    <p>Rent per month</p>
    <p>Gas, water and electricity</p>
  </div>
  <div class="Details_gridContainer__nBfKx">
    <div><p>Furnished</p></div>
    <div><p>Shared kitchen</p></div>
    <div><p>Available now</p></div>
  </div>
</body></html>"##;

#[test]
fn test_full_listing_extracts_all_field_groups() {
    let fields = listing::parse(FULL_LISTING).unwrap();

    // Price is the trailing segment after the currency symbol, verbatim
    assert_eq!(fields.price, " 650");
    assert_eq!(fields.area, "14 m2");
    assert_eq!(fields.included, "Gas, water and electricity");
    // Address splits on the first comma; surrounding whitespace is preserved
    assert_eq!(fields.street, "Main St 5");
    assert_eq!(fields.city, " Amsterdam");
    // Details keep document order
    assert_eq!(
        fields.details,
        vec!["Furnished", "Shared kitchen", "Available now"]
    );
}

#[test]
fn test_price_without_currency_symbol_is_kept_whole() {
    let html = FULL_LISTING.replace("€ 650", "650");
    let fields = listing::parse(&html).unwrap();
    assert_eq!(fields.price, "650");
}

#[test]
fn test_address_with_multiple_commas_splits_on_first() {
    let html = FULL_LISTING.replace("Main St 5, Amsterdam", "Main St 5, Amsterdam, NL");
    let fields = listing::parse(&html).unwrap();
    assert_eq!(fields.street, "Main St 5");
    assert_eq!(fields.city, " Amsterdam, NL");
}

#[test]
fn test_missing_details_grid_is_reported() {
    let html = FULL_LISTING.replace("Details_gridContainer__nBfKx", "Something_else");
    assert_eq!(listing::parse(&html), Err(MissingField("details grid")));
}

#[test]
fn test_missing_overview_is_reported() {
    let html = FULL_LISTING.replace("Overview_root__WQi2M", "Something_else");
    assert_eq!(listing::parse(&html), Err(MissingField("overview")));
}

#[test]
fn test_single_heading_means_no_area() {
    let html = FULL_LISTING.replace("<h6>14 m2</h6>", "");
    assert_eq!(listing::parse(&html), Err(MissingField("area heading")));
}

#[test]
fn test_address_without_comma_is_a_missing_anchor() {
    let html = FULL_LISTING.replace("Main St 5, Amsterdam", "Main St 5 Amsterdam");
    assert_eq!(listing::parse(&html), Err(MissingField("address comma")));
}

#[test]
fn test_empty_details_grid_yields_empty_details() {
    let html = FULL_LISTING.replace(
        r#"<div><p>Furnished</p></div>
    <div><p>Shared kitchen</p></div>
    <div><p>Available now</p></div>"#,
        "",
    );
    let fields = listing::parse(&html).unwrap();
    assert!(fields.details.is_empty());
}
