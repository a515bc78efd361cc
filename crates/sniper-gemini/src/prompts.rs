//! Prompt construction for the three request kinds the scanner issues.

use sniper_core::{Listing, PhoneModel};

/// Benchmark lookup: a single number, grounded in the refurbished-retail site.
pub(crate) fn benchmark_prompt(model: PhoneModel) -> String {
    format!(
        "Find the absolute lowest retail price for a refurbished \"{model}\" in \
         \"Excellent\" condition on backmarket.de. Return only the number."
    )
}

/// Listing extraction: structured JSON for the eight most recent ads, with
/// the retail benchmark embedded so the service can estimate profit.
pub(crate) fn extraction_prompt(model: PhoneModel, benchmark: i64) -> String {
    format!(
        r#"Act as a professional iPhone wholesaler. Deep-scan kleinanzeigen.de for the 8 most recent "{model}" ads.

DEALER-ONLY EXTRACTION RULES:
1. EXTRAPOLATE: Read the WHOLE listing description. Look for account age, battery health (Akkukapazität), storage size, and "Festpreis" vs "VB".
2. PROFIT ALGO: Calculate "profitPotential" by subtracting the price from the retail benchmark of €{benchmark} minus €100 for overhead.
3. RISK ALGO: Assign a "riskScore" (0-100). High risk if: brand new account, price too low, or text looks like a template.
4. MARKET TREND: Is this model's price generally rising, falling, or stable?

JSON format:
{{
  "listings": [{{
    "title": string, "price": string, "priceNum": number, "location": string, "url": string,
    "storageGb": string, "batteryHealth": string, "isVb": boolean,
    "riskScore": number, "profitPotential": number, "sellerInsights": string,
    "dealScore": "Great/Good/Fair/Poor", "agentComment": string, "arbitragePotential": string
  }}],
  "marketTrend": "rising/falling/stable",
  "summary": "Dealer-level market intelligence summary"
}}"#
    )
}

/// Negotiation opener for a single listing, written in German.
pub(crate) fn negotiation_prompt(listing: &Listing) -> String {
    let leverage = listing
        .battery_health
        .as_deref()
        .map_or_else(|| "competition".to_string(), |b| format!("the {b} battery"));
    format!(
        "Negotiate a lower price for {} at {}. Use \"Dealer logic\": highlight {} and \
         offer an immediate cash pickup in German.",
        listing.title, listing.price, leverage
    )
}
