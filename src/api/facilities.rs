//! Facilities and facility bookings.
//!
//! Residents request a slot; bookings start pending and an admin
//! approves or rejects them.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub availability_status: String,
}

#[derive(Debug, Serialize)]
struct NewFacility<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct FacilityBooking {
    pub id: i64,
    pub facility_name: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: String,
    /// Username of the requesting resident.
    #[serde(default)]
    pub resident: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewBooking<'a> {
    facility_name: &'a str,
    start_time: &'a str,
    end_time: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct BookingDecision {
    pub message: String,
    pub status: String,
}

impl ApiClient {
    pub async fn facilities(&self) -> Result<Vec<Facility>, ApiError> {
        self.get_json("facilities/").await
    }

    /// Admin action; the backend refuses creation for other roles.
    pub async fn create_facility(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Facility, ApiError> {
        self.post_json("facilities/", &NewFacility { name, description })
            .await
    }

    pub async fn facility_bookings(&self) -> Result<Vec<FacilityBooking>, ApiError> {
        self.get_json("facility-bookings/").await
    }

    /// Request a booking. The backend assigns the resident and the
    /// initial pending status.
    pub async fn create_booking(
        &self,
        facility_name: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<FacilityBooking, ApiError> {
        self.post_json(
            "facility-bookings/",
            &NewBooking {
                facility_name,
                start_time,
                end_time,
            },
        )
        .await
    }

    pub async fn approve_booking(&self, id: i64) -> Result<BookingDecision, ApiError> {
        self.patch_empty(&format!("facility-bookings/{}/approve/", id))
            .await
    }

    pub async fn reject_booking(&self, id: i64) -> Result<BookingDecision, ApiError> {
        self.patch_empty(&format!("facility-bookings/{}/reject/", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_parses_with_open_end() {
        let booking: FacilityBooking = serde_json::from_str(
            r#"{
                "id": 4,
                "facility_name": "Community Hall",
                "start_time": "2025-04-10T18:00:00Z",
                "end_time": null,
                "status": "pending",
                "resident": "asha"
            }"#,
        )
        .unwrap();
        assert_eq!(booking.status, "pending");
        assert!(booking.end_time.is_none());
    }

    #[test]
    fn test_new_booking_body() {
        let body = serde_json::to_value(NewBooking {
            facility_name: "Gym",
            start_time: "2025-04-10T06:00:00Z",
            end_time: "2025-04-10T07:00:00Z",
        })
        .unwrap();
        assert_eq!(body["facility_name"], "Gym");
        assert_eq!(body["end_time"], "2025-04-10T07:00:00Z");
    }
}
