use crate::middleware::auth::Claims;
use crate::models::expense::{Expense, ExpenseSubmission};
use crate::routes::trip::parse_ids;
use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

fn expenses_collection(client: &Client) -> mongodb::Collection<Expense> {
    client.database("Planner").collection("Expenses")
}

/*
    /api/trips/{id}/expenses (POST)
*/
pub async fn add(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ExpenseSubmission>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let submission = input.into_inner();
    let expense = Expense {
        id: None,
        user_id: Some(user_id),
        trip_id,
        amount: submission.amount,
        category: submission.category,
        description: submission.description,
        date: submission.date,
        created_at: Some(Utc::now()),
    };

    match expenses_collection(&client).insert_one(&expense).await {
        Ok(result) => {
            let mut created = expense;
            created.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(created)
        }
        Err(err) => {
            log::error!("Failed to insert expense: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to record expense")
        }
    }
}

/*
    /api/trips/{id}/expenses (GET)
*/
pub async fn get_for_trip(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, trip_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    let cursor = expenses_collection(&client)
        .find(doc! { "user_id": user_id, "trip_id": trip_id })
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Expense>>().await {
            Ok(expenses) => HttpResponse::Ok().json(expenses),
            Err(err) => {
                log::error!("Failed to collect expenses: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve expenses")
            }
        },
        Err(err) => {
            log::error!("Failed to retrieve expenses: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve expenses")
        }
    }
}

/*
    /api/expenses/{id} (DELETE)
*/
pub async fn delete(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let (user_id, expense_id) = match parse_ids(&claims, &path) {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    match expenses_collection(&client)
        .delete_one(doc! { "_id": expense_id, "user_id": user_id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => {
            HttpResponse::NotFound().body("Expense not found")
        }
        Ok(_) => HttpResponse::Ok().body("Expense deleted"),
        Err(err) => {
            log::error!("Failed to delete expense: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete expense")
        }
    }
}
