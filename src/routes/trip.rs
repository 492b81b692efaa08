use crate::middleware::auth::Claims;
use crate::models::trip::{
    expand_segments, normalize_days, Trip, TripDay, TripSubmission, TripUpdate,
};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::Client;
use std::sync::Arc;

fn trips_collection(client: &Client) -> mongodb::Collection<Trip> {
    client.database("Planner").collection("Trips")
}

/*
    /api/trips (POST)
*/
pub async fn create(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<TripSubmission>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let submission = input.into_inner();
    let segments = submission.resolved_segments();
    if segments.iter().all(|s| s.location.is_empty()) {
        return HttpResponse::BadRequest().body("Destination is required");
    }

    let days = expand_segments(&segments);
    let curr_time = Utc::now();

    let trip = Trip {
        id: None,
        user_id: Some(user_id),
        title: submission.title,
        destination: segments[0].location.clone(),
        start_date: submission.start_date,
        end_date: submission.end_date,
        budget: submission.budget.unwrap_or(0.0),
        currency: submission.currency.unwrap_or_else(|| "USD".to_string()),
        travelers: submission.travelers.unwrap_or(1),
        pinned: false,
        segments,
        days,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match trips_collection(&client).insert_one(&trip).await {
        Ok(result) => {
            let mut created = trip;
            created.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(created)
        }
        Err(err) => {
            log::error!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create trip")
        }
    }
}

/*
    /api/trips (GET)
*/
pub async fn get_all(claims: web::ReqData<Claims>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let cursor = trips_collection(&client)
        .find(doc! { "user_id": user_id })
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                log::error!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve trips")
            }
        },
        Err(err) => {
            log::error!("Failed to retrieve trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trips")
        }
    }
}

/*
    /api/trips/{id} (GET)
*/
pub async fn get_by_id(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    match trips_collection(&client)
        .find_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            log::error!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    /api/trips/{id} (PUT)
*/
pub async fn update(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<TripUpdate>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let updates = input.into_inner();
    let mut set = doc! { "updated_at": Utc::now().to_rfc3339() };
    if let Some(title) = updates.title {
        set.insert("title", title);
    }
    if let Some(start_date) = updates.start_date {
        set.insert("start_date", start_date.to_string());
    }
    if let Some(end_date) = updates.end_date {
        set.insert("end_date", end_date.to_string());
    }
    if let Some(budget) = updates.budget {
        set.insert("budget", budget);
    }
    if let Some(currency) = updates.currency {
        set.insert("currency", currency);
    }
    if let Some(travelers) = updates.travelers {
        set.insert("travelers", travelers as i64);
    }
    if let Some(pinned) = updates.pinned {
        set.insert("pinned", pinned);
    }

    match trips_collection(&client)
        .update_one(doc! { "_id": trip_id, "user_id": user_id }, doc! { "$set": set })
        .await
    {
        Ok(result) if result.matched_count == 0 => HttpResponse::NotFound().body("Trip not found"),
        Ok(_) => HttpResponse::Ok().body("Trip updated"),
        Err(err) => {
            log::error!("Failed to update trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update trip")
        }
    }
}

/*
    /api/trips/{id}/days (PUT)

    The client edits activities locally and pushes the whole days array back,
    so ordering and activity ids are re-established here at the boundary.
*/
pub async fn update_days(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<Vec<TripDay>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let mut days = input.into_inner();
    normalize_days(&mut days);

    let days_bson = match to_bson(&days) {
        Ok(bson) => bson,
        Err(err) => {
            log::error!("Failed to serialize days: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update trip days");
        }
    };

    let update = doc! {
        "$set": {
            "days": days_bson,
            "updated_at": Utc::now().to_rfc3339(),
        }
    };

    match trips_collection(&client)
        .update_one(doc! { "_id": trip_id, "user_id": user_id }, update)
        .await
    {
        Ok(result) if result.matched_count == 0 => HttpResponse::NotFound().body("Trip not found"),
        Ok(_) => HttpResponse::Ok().json(days),
        Err(err) => {
            log::error!("Failed to update trip days: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update trip days")
        }
    }
}

/*
    /api/trips/{id} (DELETE)
*/
pub async fn delete(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    match trips_collection(&client)
        .delete_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => HttpResponse::NotFound().body("Trip not found"),
        Ok(_) => HttpResponse::Ok().body("Trip deleted"),
        Err(err) => {
            log::error!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete trip")
        }
    }
}

pub(crate) fn parse_ids(
    claims: &Claims,
    path: &str,
) -> Result<(ObjectId, ObjectId), HttpResponse> {
    let user_id = ObjectId::parse_str(&claims.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"))?;
    let resource_id = ObjectId::parse_str(path)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid ID"))?;
    Ok((user_id, resource_id))
}
