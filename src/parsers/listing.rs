use crate::parsers::{ListingFields, MissingField};
use scraper::{ElementRef, Html, Selector};

/// Overview block: first heading is the price, second the area, second
/// paragraph the included amenities.
const OVERVIEW_CLASS: &str = "Overview_root__WQi2M";

/// Header block whose first anchor holds the "street, city" address text.
const HEADER_CLASS: &str = "Header_details__nRVNP";

/// Grid of free-form detail paragraphs.
const DETAILS_GRID_CLASS: &str = "Details_gridContainer__nBfKx";

/// Extracts the listing field groups from a fetched detail document.
///
/// Every anchor is required; the first one missing aborts the parse and the
/// caller records the listing as a failure. Details are kept as an opaque
/// ordered list of paragraph texts, since their shape differs per listing.
pub fn parse(html: &str) -> Result<ListingFields, MissingField> {
    let doc = Html::parse_document(html);

    let overview = find_by_class(&doc, OVERVIEW_CLASS).ok_or(MissingField("overview"))?;
    let headings = children_of(&overview, "h6");
    let price_heading = headings.first().ok_or(MissingField("price heading"))?;
    let area_heading = headings.get(1).ok_or(MissingField("area heading"))?;
    let included = children_of(&overview, "p")
        .into_iter()
        .nth(1)
        .ok_or(MissingField("included amenities"))?;

    let header = find_by_class(&doc, HEADER_CLASS).ok_or(MissingField("header"))?;
    let address = children_of(&header, "a")
        .into_iter()
        .next()
        .ok_or(MissingField("address"))?;
    let address_text = text_of(&address);
    // Street before the first comma, city after it, whitespace kept verbatim
    let (street, city) = address_text
        .split_once(',')
        .ok_or(MissingField("address comma"))?;

    let grid = find_by_class(&doc, DETAILS_GRID_CLASS).ok_or(MissingField("details grid"))?;
    let details = children_of(&grid, "p").iter().map(text_of).collect();

    Ok(ListingFields {
        price: price_after_currency(&text_of(price_heading)),
        area: text_of(area_heading),
        included: text_of(&included),
        street: street.to_string(),
        city: city.to_string(),
        details,
    })
}

/// Trailing segment after the currency symbol, the whole text when absent.
fn price_after_currency(text: &str) -> String {
    text.split('€').next_back().unwrap_or(text).to_string()
}

fn find_by_class<'a>(doc: &'a Html, class: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(&format!(".{class}")).unwrap();
    doc.select(&selector).next()
}

fn children_of<'a>(scope: &ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(tag).unwrap();
    scope.select(&selector).collect()
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
