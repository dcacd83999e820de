use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
	Premium,
	Entry,
	Cobrand,
	#[default]
	#[serde(other)]
	Regular,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
	RewardPoints,
	#[default]
	#[serde(other)]
	Cashback,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
	Percentage,
	#[default]
	#[serde(other)]
	Fixed,
}

/// A reward rule. `value` is a percentage for both benefit types.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Benefit {
	#[serde(default)]
	pub category: String,
	#[serde(default)]
	pub r#type: BenefitType,
	#[serde(default)]
	pub value: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub conditions: Option<String>,
}
impl Benefit {
	/// `needle` must already be lower-cased.
	pub fn matches(&self, needle: &str) -> bool {
		self.category.to_lowercase().contains(needle)
			|| self
				.description
				.as_deref()
				.map(|description| description.to_lowercase().contains(needle))
				.unwrap_or(false)
	}

	/// "Amazon: 5%" or "Travel: 4% RP".
	pub fn label(&self) -> String {
		let suffix = match self.r#type {
			BenefitType::RewardPoints => " RP",
			BenefitType::Cashback => "",
		};

		format!("{}: {}%{suffix}", self.category, self.value)
	}
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FeeItem {
	#[serde(default)]
	pub value: f64,
	#[serde(default)]
	pub r#type: FeeType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesAndCharges {
	#[serde(default)]
	pub annual: FeeItem,
	#[serde(default)]
	pub joining: FeeItem,
	#[serde(default)]
	pub cash_withdrawal: FeeItem,
	#[serde(default)]
	pub forex: FeeItem,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub education_transaction: Option<FeeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wallet_load: Option<FeeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub utility_bill_payment: Option<FeeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rent_transaction: Option<FeeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fuel_transaction: Option<FeeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub other: Option<FeeItem>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LoungeItem {
	#[serde(default)]
	pub quantity: u32,
	#[serde(default)]
	pub precondition: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Lounge {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domestic: Option<LoungeItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub international: Option<LoungeItem>,
}

/// A card product. `name` is the join key between ranking output and the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
	pub name: String,
	#[serde(default)]
	pub bank_name: String,
	#[serde(default)]
	pub card_type: CardType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default = "default_link")]
	pub link: String,
	#[serde(default)]
	pub benefits: Vec<Benefit>,
	#[serde(default)]
	pub fees_and_charges: FeesAndCharges,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lounge: Option<Lounge>,
}
impl Card {
	/// Highest-value benefit; the first one wins a tie.
	pub fn top_benefit(&self) -> Option<&Benefit> {
		max_by_value(self.benefits.iter())
	}

	/// Benefits whose category or description contains `needle` (already lower-cased).
	pub fn matching_benefits<'a, 'n>(
		&'a self,
		needle: &'n str,
	) -> impl Iterator<Item = &'a Benefit> {
		self.benefits.iter().filter(move |benefit| benefit.matches(needle))
	}
}

pub(crate) fn max_by_value<'a>(benefits: impl Iterator<Item = &'a Benefit>) -> Option<&'a Benefit> {
	let mut best: Option<&Benefit> = None;

	for benefit in benefits {
		if best.map(|current| benefit.value > current.value).unwrap_or(true) {
			best = Some(benefit);
		}
	}

	best
}

fn default_link() -> String {
	"#".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_unknown_enum_values_leniently() {
		let card: Card = serde_json::from_value(serde_json::json!({
			"name": "Odd Card",
			"cardType": "platinum",
			"benefits": [{ "category": "Fuel", "type": "miles", "value": 2 }],
			"feesAndCharges": { "annual": { "value": 500, "type": "flat" } }
		}))
		.expect("Card must decode.");

		assert_eq!(card.card_type, CardType::Regular);
		assert_eq!(card.benefits[0].r#type, BenefitType::Cashback);
		assert_eq!(card.fees_and_charges.annual.r#type, FeeType::Fixed);
		assert_eq!(card.fees_and_charges.joining, FeeItem::default());
		assert_eq!(card.link, "#");
	}

	#[test]
	fn encodes_camel_case_keys() {
		let card: Card = serde_json::from_value(serde_json::json!({
			"name": "Wire Card",
			"bankName": "HDFC Bank",
			"cardType": "lifetime_free"
		}))
		.expect("Card must decode.");
		let value = serde_json::to_value(&card).expect("Card must encode.");

		assert_eq!(value["bankName"], "HDFC Bank");
		assert_eq!(value["cardType"], "regular");
		assert!(value["feesAndCharges"].get("cashWithdrawal").is_some());
		assert!(value.get("lounge").is_none());
	}

	#[test]
	fn benefit_match_covers_category_and_description() {
		let benefit = Benefit {
			category: "Online Shopping".to_string(),
			r#type: BenefitType::Cashback,
			value: 5.0,
			description: Some("Accelerated cashback on Amazon".to_string()),
			conditions: None,
		};

		assert!(benefit.matches("shopping"));
		assert!(benefit.matches("amazon"));
		assert!(!benefit.matches("fuel"));
	}

	#[test]
	fn top_benefit_keeps_first_on_tie() {
		let benefit = |category: &str, value: f64| Benefit {
			category: category.to_string(),
			r#type: BenefitType::RewardPoints,
			value,
			description: None,
			conditions: None,
		};
		let card = Card {
			name: "Tie Card".to_string(),
			bank_name: String::new(),
			card_type: CardType::Premium,
			description: None,
			link: default_link(),
			benefits: vec![benefit("Travel", 4.0), benefit("Dining", 4.0), benefit("General", 1.0)],
			fees_and_charges: FeesAndCharges::default(),
			lounge: None,
		};

		assert_eq!(card.top_benefit().map(|b| b.category.as_str()), Some("Travel"));
		assert_eq!(card.benefits[0].label(), "Travel: 4% RP");
	}
}
