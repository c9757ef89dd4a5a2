//! Prompt rendering and reply parsing for next-activity recommendations.
//!
//! The completion model is asked for three labelled lines. Replies are parsed
//! into a [`ParsedReply`] so callers can tell a usable answer from a partial
//! or unrecognisable one; only [`ParsedReply::Complete`] yields model output,
//! everything else is replaced by [`fallback_event`].

use serde_json::Value;

use super::{EventDetails, EventSource, Mood, TripParameters, UserProfile};

/// Placeholder rendered for absent or blank prompt fields.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Name of the event substituted when no usable reply is available.
pub const FALLBACK_EVENT_NAME: &str = "Explore the local area";
/// Description of the fallback event.
pub const FALLBACK_EVENT_DESCRIPTION: &str = "Take a relaxed walk around your surroundings \
     and discover nearby cafes, shops and sights at your own pace.";
/// Location used by the fallback event when the caller gave none.
pub const FALLBACK_EVENT_LOCATION: &str = "Near your current location";

const NAME_FIELD: &str = "name";
const DESCRIPTION_FIELD: &str = "description";
const LOCATION_FIELD: &str = "location";

/// Summary of the event a user just finished, used to steer the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousEvent {
    /// Name of the previous activity.
    pub name: String,
    /// The user's rating of it, as text.
    pub rating: Option<String>,
}

/// Everything the prompt template may mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationContext {
    /// Demographic profile; absent when the account has none recorded.
    pub profile: Option<UserProfile>,
    /// Fixed trip parameters.
    pub parameters: TripParameters,
    /// Where the user is now.
    pub current_location: String,
    /// Current mood, when feedback was given.
    pub mood: Option<Mood>,
    /// The activity that preceded this request, if any.
    pub previous_event: Option<PreviousEvent>,
}

/// Event details plus the path that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Recommended activity.
    pub details: EventDetails,
    /// Model or fallback.
    pub source: EventSource,
}

impl Recommendation {
    /// Recommendation parsed from a model reply.
    pub fn from_model(details: EventDetails) -> Self {
        Self {
            details,
            source: EventSource::Model,
        }
    }

    /// Fallback recommendation for the given location.
    pub fn fallback(current_location: &str) -> Self {
        Self {
            details: fallback_event(current_location),
            source: EventSource::Fallback,
        }
    }
}

/// Outcome of parsing a completion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// All three required fields were found.
    Complete(EventDetails),
    /// Some required fields were found; the listed ones were absent or blank.
    Incomplete {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },
    /// Nothing recognisable was found.
    Unparseable,
}

/// Render the natural-language prompt for a recommendation request.
///
/// # Examples
/// ```
/// use tripadapt::domain::{
///     render_prompt, RecommendationContext, TripDuration, TripParameters, NOT_SPECIFIED,
/// };
///
/// let context = RecommendationContext {
///     profile: None,
///     parameters: TripParameters {
///         budget: "budget".into(),
///         group_type: "friends".into(),
///         group_size: "3-4".into(),
///         duration: TripDuration::new(2).unwrap(),
///         trip_location: "Lisbon".into(),
///         current_location: "Alfama".into(),
///         child_friendly: false,
///     },
///     current_location: "Alfama".into(),
///     mood: None,
///     previous_event: None,
/// };
/// let prompt = render_prompt(&context);
/// assert!(prompt.contains("- Destination: Lisbon"));
/// assert!(prompt.contains(&format!("- Mood: {NOT_SPECIFIED}")));
/// ```
pub fn render_prompt(context: &RecommendationContext) -> String {
    let profile = context.profile.as_ref();
    let parameters = &context.parameters;
    let previous = context.previous_event.as_ref();

    let gender = or_not_specified(profile.map(|p| p.gender.as_str()));
    let age = or_not_specified(profile.map(|p| p.age.as_str()));
    let ethnicity = or_not_specified(profile.map(|p| p.ethnicity.as_str()));
    let destination = or_not_specified(Some(parameters.trip_location.as_str()));
    let budget = or_not_specified(Some(parameters.budget.as_str()));
    let group_type = or_not_specified(Some(parameters.group_type.as_str()));
    let group_size = or_not_specified(Some(parameters.group_size.as_str()));
    let days = parameters.duration.days();
    let child_friendly = if parameters.child_friendly { "yes" } else { "no" };
    let current_location = or_not_specified(Some(context.current_location.as_str()));
    let mood = or_not_specified(context.mood.as_ref().map(Mood::as_str));
    let previous_name = or_not_specified(previous.map(|p| p.name.as_str()));
    let previous_rating = or_not_specified(previous.and_then(|p| p.rating.as_deref()));

    format!(
        "You are a travel assistant planning the next activity of a trip.\n\
         \n\
         Traveller profile:\n\
         - Gender: {gender}\n\
         - Age: {age}\n\
         - Ethnicity: {ethnicity}\n\
         \n\
         Trip details:\n\
         - Destination: {destination}\n\
         - Budget: {budget}\n\
         - Group type: {group_type}\n\
         - Group size: {group_size}\n\
         - Duration: {days} day(s)\n\
         - Child friendly: {child_friendly}\n\
         \n\
         Current situation:\n\
         - Current location: {current_location}\n\
         - Mood: {mood}\n\
         - Previous activity: {previous_name}\n\
         - Rating of previous activity: {previous_rating}\n\
         \n\
         Suggest exactly one activity the group can do next, close to the current location.\n\
         Reply with exactly these three lines and nothing else:\n\
         - Name: <activity name>\n\
         - Description: <one or two sentences>\n\
         - Location: <place name or address>\n"
    )
}

fn or_not_specified(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => NOT_SPECIFIED,
    }
}

/// Parse a completion reply into event details.
///
/// A JSON object with `name`, `description` and `location` keys is accepted
/// first; otherwise lines of the form `- Name: ...` are scanned. Bullets,
/// list numbers, markdown bold markers and label case are ignored.
///
/// # Examples
/// ```
/// use tripadapt::domain::{parse_reply, ParsedReply};
///
/// let reply = "- Name: Tram 28\n- Description: Ride the old tram.\n- Location: Martim Moniz";
/// assert!(matches!(parse_reply(reply), ParsedReply::Complete(_)));
/// assert_eq!(parse_reply("I cannot help"), ParsedReply::Unparseable);
/// ```
pub fn parse_reply(reply: &str) -> ParsedReply {
    let body = strip_code_fence(reply.trim());
    let fields = parse_json_fields(body).unwrap_or_else(|| parse_labelled_lines(body));
    fields.into_parsed()
}

#[derive(Default)]
struct ReplyFields {
    name: Option<String>,
    description: Option<String>,
    location: Option<String>,
}

impl ReplyFields {
    fn set(&mut self, label: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let slot = match label {
            NAME_FIELD => &mut self.name,
            DESCRIPTION_FIELD => &mut self.description,
            LOCATION_FIELD => &mut self.location,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_owned());
        }
    }

    fn into_parsed(self) -> ParsedReply {
        match (self.name, self.description, self.location) {
            (Some(name), Some(description), Some(location)) => {
                ParsedReply::Complete(EventDetails::new(name, description, location))
            }
            (None, None, None) => ParsedReply::Unparseable,
            (name, description, location) => {
                let missing = [
                    (NAME_FIELD, name.is_none()),
                    (DESCRIPTION_FIELD, description.is_none()),
                    (LOCATION_FIELD, location.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                ParsedReply::Incomplete { missing }
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_end().strip_suffix("```").unwrap_or(rest);
    // Drop an info string such as `json` on the opening fence line.
    match rest.split_once('\n') {
        Some((info, body)) if !info.contains(':') => body.trim(),
        _ => rest.trim(),
    }
}

fn parse_json_fields(body: &str) -> Option<ReplyFields> {
    let Value::Object(map) = serde_json::from_str::<Value>(body).ok()? else {
        return None;
    };
    let mut fields = ReplyFields::default();
    for (key, value) in &map {
        if let Value::String(text) = value {
            fields.set(key.trim().to_ascii_lowercase().as_str(), text);
        }
    }
    Some(fields)
}

fn parse_labelled_lines(body: &str) -> ReplyFields {
    let mut fields = ReplyFields::default();
    for line in body.lines() {
        let cleaned = line.replace("**", "");
        if let Some((label, value)) = strip_list_marker(&cleaned).split_once(':') {
            fields.set(label.trim().to_ascii_lowercase().as_str(), value);
        }
    }
    fields
}

fn strip_list_marker(line: &str) -> &str {
    let unbulleted = line.trim().trim_start_matches(['-', '*', '•']).trim_start();
    let digits = unbulleted
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unbulleted.len());
    if digits == 0 {
        return unbulleted;
    }
    unbulleted
        .get(digits..)
        .and_then(|rest| rest.strip_prefix(['.', ')']))
        .map_or(unbulleted, str::trim_start)
}

/// Default event used when the model reply is unavailable or unusable.
///
/// # Examples
/// ```
/// use tripadapt::domain::{fallback_event, FALLBACK_EVENT_NAME};
///
/// let event = fallback_event("Rossio Square");
/// assert_eq!(event.name, FALLBACK_EVENT_NAME);
/// assert_eq!(event.location, "Rossio Square");
/// ```
pub fn fallback_event(current_location: &str) -> EventDetails {
    let location = match current_location.trim() {
        "" => FALLBACK_EVENT_LOCATION,
        trimmed => trimmed,
    };
    EventDetails::new(FALLBACK_EVENT_NAME, FALLBACK_EVENT_DESCRIPTION, location)
}
