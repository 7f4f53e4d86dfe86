//! Quote-to-offer mapping.
//!
//! Every quote becomes exactly one checkout offer. Offer IDs are namespaced
//! with [`OFFER_ID_PREFIX`] and kept unique within a response so each carrier
//! stays a separate selectable option.

use std::collections::HashSet;

use envios_core::{
    Locale, OFFER_ID_PREFIX, OfferMetadata, ShippingRateOffer, format_delivery_time,
    with_delivery_time,
};

use crate::response::Quote;

/// Build checkout offers from quotes, in quote order.
///
/// `fallback_label` is used when a quote has neither a display name nor a
/// carrier name.
#[must_use]
pub fn build_offers(
    quotes: &[Quote],
    fallback_label: &str,
    locale: Locale,
) -> Vec<ShippingRateOffer> {
    let mut seen = HashSet::new();

    quotes
        .iter()
        .enumerate()
        .map(|(index, quote)| {
            let carrier = carrier_slug(quote, index);
            let id = unique_id(&carrier, &mut seen);
            build_offer(quote, id, carrier, fallback_label, locale)
        })
        .collect()
}

fn build_offer(
    quote: &Quote,
    id: String,
    carrier: String,
    fallback_label: &str,
    locale: Locale,
) -> ShippingRateOffer {
    let name = quote
        .display_name
        .as_deref()
        .or(quote.carrier_name.as_deref())
        .unwrap_or(fallback_label);

    let delivery_time_label =
        (quote.delivery_time > 0).then(|| format_delivery_time(quote.delivery_time, locale));

    ShippingRateOffer {
        id,
        label: with_delivery_time(name, quote.delivery_time, locale),
        cost: quote.total_cost,
        delivery_time: quote.delivery_time,
        metadata: OfferMetadata {
            delivery_time: quote.delivery_time,
            delivery_time_label,
            carrier,
            carrier_name: quote.carrier_name.clone(),
        },
    }
}

/// Slug for a quote: `carrier_slug`, else the sanitized carrier name, else the
/// sanitized display name, else `quote-<n>`.
fn carrier_slug(quote: &Quote, index: usize) -> String {
    [
        quote.carrier_slug.as_deref(),
        quote.carrier_name.as_deref(),
        quote.display_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(sanitize_slug)
    .find(|slug| !slug.is_empty())
    .unwrap_or_else(|| format!("quote-{}", index + 1))
}

/// Prefix the slug and make it unique among the IDs already emitted.
fn unique_id(slug: &str, seen: &mut HashSet<String>) -> String {
    let mut id = format!("{OFFER_ID_PREFIX}{slug}");
    let mut n = 2;
    while !seen.insert(id.clone()) {
        id = format!("{OFFER_ID_PREFIX}{slug}-{n}");
        n += 1;
    }
    id
}

/// Lowercase ASCII slug: letters and digits kept, Portuguese accents folded,
/// everything else collapsed into single dashes.
#[must_use]
pub fn sanitize_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

const fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
