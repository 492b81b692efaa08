use crate::middleware::auth::Claims;
use crate::models::booking::{Booking, BookingStatusUpdate};
use crate::routes::trip::parse_ids;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::Client;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

fn bookings_collection(client: &Client) -> mongodb::Collection<Booking> {
    client.database("Planner").collection("Bookings")
}

/// Reference codes look like "BK-7F3KQ2ZC".
fn generate_reference() -> String {
    let code: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();

    format!("BK-{}", code)
}

/*
    /api/bookings (POST)
*/
pub async fn create(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<Booking>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let curr_time = Utc::now();
    let mut booking = input.into_inner();
    booking.id = None;
    booking.user_id = Some(user_id);
    booking.reference = Some(generate_reference());
    booking.created_at = Some(curr_time);
    booking.updated_at = Some(curr_time);

    match bookings_collection(&client).insert_one(&booking).await {
        Ok(result) => {
            booking.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(booking)
        }
        Err(err) => {
            log::error!("Failed to insert booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create booking")
        }
    }
}

/*
    /api/bookings (GET)
*/
pub async fn get_all(claims: web::ReqData<Claims>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let cursor = bookings_collection(&client)
        .find(doc! { "user_id": user_id })
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                log::error!("Failed to collect bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            log::error!("Failed to retrieve bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve bookings")
        }
    }
}

/*
    /api/bookings/{id}/status (PUT)
*/
pub async fn update_status(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<BookingStatusUpdate>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, booking_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let status_bson = match to_bson(&input.status) {
        Ok(bson) => bson,
        Err(err) => {
            log::error!("Failed to serialize status: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update booking");
        }
    };

    let update = doc! {
        "$set": {
            "status": status_bson,
            "updated_at": Utc::now().to_rfc3339(),
        }
    };

    match bookings_collection(&client)
        .update_one(doc! { "_id": booking_id, "user_id": user_id }, update)
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Booking not found")
        }
        Ok(_) => HttpResponse::Ok().body("Booking updated"),
        Err(err) => {
            log::error!("Failed to update booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}

/*
    /api/bookings/{id} (DELETE)
*/
pub async fn delete(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, booking_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    match bookings_collection(&client)
        .delete_one(doc! { "_id": booking_id, "user_id": user_id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => {
            HttpResponse::NotFound().body("Booking not found")
        }
        Ok(_) => HttpResponse::Ok().body("Booking deleted"),
        Err(err) => {
            log::error!("Failed to delete booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete booking")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reference_shape() {
        let reference = generate_reference();
        assert!(reference.starts_with("BK-"));
        assert_eq!(reference.len(), 11);
        assert!(reference[3..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
