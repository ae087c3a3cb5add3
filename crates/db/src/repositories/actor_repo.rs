//! Store operations for the `actors` table.

use library_core::resource::ResourceKind;
use library_core::types::DbId;
use sqlx::PgConnection;

use super::person;
use crate::models::person::{Actor, PersonForm};
use crate::resource::Resource;

impl Resource for Actor {
    type Form = PersonForm;

    const KIND: ResourceKind = ResourceKind::Actor;
    const COLUMNS: &'static str = person::COLUMNS;
    const ORDER_BY: &'static str = person::ORDER_BY;
    const UNIQUE_FIELD: &'static str = "first_name";

    fn id(&self) -> DbId {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn to_form(&self) -> PersonForm {
        PersonForm::from(self)
    }

    fn duplicate_message(form: &PersonForm) -> String {
        format!("An actor named \"{} {}\" already exists.", form.first_name, form.last_name)
    }

    async fn find_duplicate(
        conn: &mut PgConnection,
        form: &PersonForm,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        person::find_duplicate(conn, "actors", form, exclude_id).await
    }

    async fn insert(conn: &mut PgConnection, form: &PersonForm) -> Result<Actor, sqlx::Error> {
        person::insert(conn, "actors", form).await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        form: &PersonForm,
    ) -> Result<Actor, sqlx::Error> {
        person::update(conn, "actors", id, form).await
    }
}
