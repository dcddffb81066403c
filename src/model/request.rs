use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::booking::{Attachment, BookingFormState};

/// The lead sent to the booking-intake service.
///
/// Carries every customer-entered field; UI-only state (manual-entry flag,
/// open dropdowns) is left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub preferred_time: Option<String>,
    pub urgency: Option<String>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_date_type: Option<String>,
    pub preferred_date_range: Option<String>,
    pub message: String,
    pub newsletter: bool,
    pub terms_accepted: bool,
    pub files: Vec<Attachment>,
    pub submitted_at: DateTime<Utc>,
}

impl BookingRequest {
    /// Snapshots the form state into a request.
    pub fn from_state(state: &BookingFormState, submitted_at: DateTime<Utc>) -> Self {
        Self {
            name: state.name.trim().to_string(),
            email: state.email.trim().to_string(),
            phone: state.phone.trim().to_string(),
            address: state.address.trim().to_string(),
            services: state.services.iter().map(|s| s.label().to_string()).collect(),
            preferred_time: state.preferred_time.map(|t| t.label().to_string()),
            urgency: state.urgency.map(|u| u.label().to_string()),
            preferred_date: state.preferred_date.date(),
            preferred_date_type: state.preferred_date.kind().map(str::to_string),
            preferred_date_range: state.preferred_date.range().map(|r| r.label().to_string()),
            message: state.message.clone(),
            newsletter: state.newsletter,
            terms_accepted: state.terms_accepted,
            files: state.files.clone(),
            submitted_at,
        }
    }

    /// Scalar fields as `(name, value)` pairs, in wire order.
    ///
    /// Absent optional fields are omitted. Services and files are sent as
    /// repeated parts and are not included here.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("address", self.address.clone()),
        ];
        if let Some(ref time) = self.preferred_time {
            fields.push(("preferredTime", time.clone()));
        }
        if let Some(ref urgency) = self.urgency {
            fields.push(("urgency", urgency.clone()));
        }
        if let Some(date) = self.preferred_date {
            fields.push(("preferredDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(ref kind) = self.preferred_date_type {
            fields.push(("preferredDateType", kind.clone()));
        }
        if let Some(ref range) = self.preferred_date_range {
            fields.push(("preferredDateRange", range.clone()));
        }
        fields.push(("message", self.message.clone()));
        fields.push(("newsletter", self.newsletter.to_string()));
        fields.push(("termsAccepted", self.terms_accepted.to_string()));
        fields.push(("submittedAt", self.submitted_at.to_rfc3339()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;

    use super::*;
    use crate::model::{
        DateRange, PreferredDate, PreferredTime, Service, ServiceCategory, ServiceItem, Urgency,
    };

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    fn make_state() -> BookingFormState {
        BookingFormState {
            name: " Jo Citizen ".into(),
            email: "jo@example.com.au".into(),
            phone: "0412345678".into(),
            address: "1 George St, Sydney NSW 2000".into(),
            manual_entry: true,
            services: BTreeSet::from([
                ServiceItem::Category(ServiceCategory::GasFitting),
                ServiceItem::Service(Service::BlockedDrains),
            ]),
            preferred_time: Some(PreferredTime::Morning),
            urgency: Some(Urgency::Within24Hours),
            preferred_date: PreferredDate::Specific(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()),
            message: "Kitchen sink backs up".into(),
            files: vec![Attachment::new("/tmp/sink.jpg")],
            newsletter: false,
            terms_accepted: true,
        }
    }

    #[test]
    fn snapshot_trims_text_and_flattens_selections() {
        let req = BookingRequest::from_state(&make_state(), submitted_at());
        assert_eq!(req.name, "Jo Citizen");
        assert_eq!(req.services, vec!["Gas Fitting", "Blocked Drains"]);
        assert_eq!(req.preferred_time.as_deref(), Some("Morning (7am - 12pm)"));
        assert_eq!(req.preferred_date_type.as_deref(), Some("specific"));
        assert_eq!(req.preferred_date_range, None);
        assert_eq!(req.files.len(), 1);
    }

    #[test]
    fn range_preference_has_no_date() {
        let mut state = make_state();
        state.preferred_date = PreferredDate::Range(DateRange::ThisMonth);
        let req = BookingRequest::from_state(&state, submitted_at());
        assert_eq!(req.preferred_date, None);
        assert_eq!(req.preferred_date_type.as_deref(), Some("range"));
        assert_eq!(req.preferred_date_range.as_deref(), Some("This month"));
    }

    #[test]
    fn text_fields_skip_unset_options() {
        let mut state = make_state();
        state.preferred_time = None;
        state.urgency = None;
        state.preferred_date = PreferredDate::Unset;
        let req = BookingRequest::from_state(&state, submitted_at());
        let names: Vec<&str> = req.text_fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "email",
                "phone",
                "address",
                "message",
                "newsletter",
                "termsAccepted",
                "submittedAt"
            ]
        );
    }

    #[test]
    fn json_shape() {
        let req = BookingRequest::from_state(&make_state(), submitted_at());
        insta::assert_snapshot!(serde_json::to_string_pretty(&req).unwrap(), @r#"
        {
          "name": "Jo Citizen",
          "email": "jo@example.com.au",
          "phone": "0412345678",
          "address": "1 George St, Sydney NSW 2000",
          "services": [
            "Gas Fitting",
            "Blocked Drains"
          ],
          "preferredTime": "Morning (7am - 12pm)",
          "urgency": "Within 24 hours",
          "preferredDate": "2026-10-20",
          "preferredDateType": "specific",
          "preferredDateRange": null,
          "message": "Kitchen sink backs up",
          "newsletter": false,
          "termsAccepted": true,
          "files": [
            {
              "path": "/tmp/sink.jpg"
            }
          ],
          "submittedAt": "2026-10-17T09:30:00Z"
        }
        "#);
    }

    #[test]
    fn serde_round_trip() {
        let req = BookingRequest::from_state(&make_state(), submitted_at());
        let json = serde_json::to_string(&req).unwrap();
        let back: BookingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
