use serde::Serialize;

use super::{Call, Delivery};
use crate::client::Client;
use crate::types::{ChatId, Message, MessageEntity, ParseMode, PollType, ReplyMarkup};

/// `sendLocation`. Set `live_period` to send a live location.
#[derive(Debug, Clone, Serialize)]
pub struct SendLocation<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    latitude: f64,
    longitude: f64,
    horizontal_accuracy: Option<f64>,
    live_period: Option<i64>,
    heading: Option<i64>,
    proximity_alert_radius: Option<i64>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendLocation<'a> {
    setters! {
        horizontal_accuracy: f64,
        live_period: i64,
        heading: i64,
        proximity_alert_radius: i64,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendLocation, "/sendLocation", Message);

#[derive(Debug, Clone, Serialize)]
pub struct SendVenue<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    latitude: f64,
    longitude: f64,
    title: String,
    address: String,
    foursquare_id: Option<String>,
    foursquare_type: Option<String>,
    google_place_id: Option<String>,
    google_place_type: Option<String>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendVenue<'a> {
    setters! {
        foursquare_id: String,
        foursquare_type: String,
        google_place_id: String,
        google_place_type: String,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendVenue, "/sendVenue", Message);

#[derive(Debug, Clone, Serialize)]
pub struct SendContact<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    phone_number: String,
    first_name: String,
    last_name: Option<String>,
    /// Additional data about the contact as a vCard.
    vcard: Option<String>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendContact<'a> {
    setters! {
        last_name: String,
        vcard: String,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendContact, "/sendContact", Message);

/// `sendPoll`. `options` takes 2 to 10 answers.
#[derive(Debug, Clone, Serialize)]
pub struct SendPoll<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    question: String,
    options: Vec<String>,
    is_anonymous: Option<bool>,
    #[serde(rename = "type")]
    poll_type: Option<PollType>,
    allows_multiple_answers: Option<bool>,
    correct_option_id: Option<i64>,
    explanation: Option<String>,
    explanation_parse_mode: Option<ParseMode>,
    explanation_entities: Option<Vec<MessageEntity>>,
    open_period: Option<i64>,
    close_date: Option<i64>,
    is_closed: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendPoll<'a> {
    setters! {
        is_anonymous: bool,
        poll_type: PollType,
        allows_multiple_answers: bool,
        correct_option_id: i64,
        explanation: String,
        explanation_parse_mode: ParseMode,
        explanation_entities: Vec<MessageEntity>,
        open_period: i64,
        close_date: i64,
        is_closed: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendPoll, "/sendPoll", Message);

/// `sendDice`: an animated emoji with a random value.
#[derive(Debug, Clone, Serialize)]
pub struct SendDice<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    emoji: Option<String>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendDice<'a> {
    setters! {
        emoji: String,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendDice, "/sendDice", Message);

impl Client {
    pub fn send_location(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
    ) -> SendLocation<'_> {
        SendLocation {
            call: Call::new(self),
            chat_id: chat_id.into(),
            latitude,
            longitude,
            horizontal_accuracy: None,
            live_period: None,
            heading: None,
            proximity_alert_radius: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_venue(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        title: impl Into<String>,
        address: impl Into<String>,
    ) -> SendVenue<'_> {
        SendVenue {
            call: Call::new(self),
            chat_id: chat_id.into(),
            latitude,
            longitude,
            title: title.into(),
            address: address.into(),
            foursquare_id: None,
            foursquare_type: None,
            google_place_id: None,
            google_place_type: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_contact(
        &self,
        chat_id: impl Into<ChatId>,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
    ) -> SendContact<'_> {
        SendContact {
            call: Call::new(self),
            chat_id: chat_id.into(),
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: None,
            vcard: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_poll<I, S>(&self, chat_id: impl Into<ChatId>, question: impl Into<String>, options: I) -> SendPoll<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SendPoll {
            call: Call::new(self),
            chat_id: chat_id.into(),
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            is_anonymous: None,
            poll_type: None,
            allows_multiple_answers: None,
            correct_option_id: None,
            explanation: None,
            explanation_parse_mode: None,
            explanation_entities: None,
            open_period: None,
            close_date: None,
            is_closed: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_dice(&self, chat_id: impl Into<ChatId>) -> SendDice<'_> {
        SendDice {
            call: Call::new(self),
            chat_id: chat_id.into(),
            emoji: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::stub_client;
    use crate::types::PollType;

    #[test]
    fn poll_keys_are_snake_case() {
        let (client, _) = stub_client(200, "{}");
        let request = client
            .send_poll(1, "Lunch?", ["Pizza", "Sushi"])
            .poll_type(PollType::Quiz)
            .correct_option_id(1)
            .is_anonymous(false)
            .request()
            .unwrap();
        assert_eq!(request.query.get("question"), Some("Lunch?"));
        assert_eq!(request.query.get("options"), Some(r#"["Pizza","Sushi"]"#));
        assert_eq!(request.query.get("type"), Some("quiz"));
        assert_eq!(request.query.get("correct_option_id"), Some("1"));
        assert_eq!(request.query.get("is_anonymous"), Some("false"));
        assert!(!request.query.contains("allows_multiple_answers"));
    }

    #[test]
    fn location_coordinates_are_plain_numbers() {
        let (client, _) = stub_client(200, "{}");
        let request = client
            .send_location(1, 52.52, 13.405)
            .live_period(600)
            .request()
            .unwrap();
        assert_eq!(request.query.get("latitude"), Some("52.52"));
        assert_eq!(request.query.get("longitude"), Some("13.405"));
        assert_eq!(request.query.get("live_period"), Some("600"));
    }

    #[test]
    fn venue_and_contact_required_params() {
        let (client, _) = stub_client(200, "{}");
        let venue = client
            .send_venue(1, 1.0, 2.0, "Cafe", "Main St 1")
            .request()
            .unwrap();
        assert_eq!(venue.query.len(), 5);
        assert_eq!(venue.query.get("address"), Some("Main St 1"));

        let contact = client
            .send_contact(1, "+4912345", "Ann")
            .vcard("BEGIN:VCARD")
            .request()
            .unwrap();
        assert_eq!(contact.query.get("phone_number"), Some("+4912345"));
        assert_eq!(contact.query.get("vcard"), Some("BEGIN:VCARD"));
    }

    #[test]
    fn dice_emoji_is_optional() {
        let (client, _) = stub_client(200, "{}");
        let plain = client.send_dice(1).request().unwrap();
        assert_eq!(plain.query.len(), 1);
        let darts = client.send_dice(1).emoji("🎯").request().unwrap();
        assert_eq!(darts.query.get("emoji"), Some("🎯"));
    }
}
