/// Order identifier; repeats across the items of one order.
/// Example: `e481f51cbdc54678b7cc49136f2d6af7`
pub type OrderId = String;
/// Identifier of the purchasing customer.
/// Example: `9ef432eb6251297304e76186b10a928d`
pub type CustomerId = String;
/// Product category label.
/// Examples: `cama_mesa_banho`, `beleza_saude`
pub type CategoryName = String;
/// Customer city label.
/// Examples: `sao paulo`, `rio de janeiro`
pub type CityName = String;
/// Customer state code.
/// Examples: `SP`, `RJ`
pub type StateCode = String;
/// Review score on the fixed 1..=5 scale.
pub type ReviewScore = u8;
/// ISO 4217 currency code used for revenue display.
/// Examples: `AUD`, `BRL`
pub type CurrencyCode = String;
/// Locale identifier used for number formatting.
/// Examples: `es_CO`, `en_US`
pub type LocaleId = String;
