//! Header names of the source CSV.
//!
//! Spelling follows the published dataset, including its typos.

pub const NAME: &str = "Massacre Name";
pub const LOCATION: &str = "Location (Google Maps)";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const DATE: &str = "Date";
pub const GOVERNOR: &str = "State Governor at the Time";
pub const MINORS: &str = "Minor Victims (Under 18)";
pub const DISAPPEARANCES: &str = "Enforced Dissapearances";
pub const STATE_ACTION: &str = "Victims of State/Police Action";
pub const MILITIA: &str = "Victims of Faction/Militia Conflict";
pub const POLICE: &str = "Police Officers Victims";
pub const NAMES: &str = "Names";
pub const NOTES: &str = "Notes";
pub const LINK: &str = "WikiFavelas Source Link";
