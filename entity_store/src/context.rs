//! Entity context
//!
//! `EntityContext` is the per-type entry point: constructing one resolves the
//! type's descriptor and synchronizes its table, after which it persists,
//! queries and deletes values of that type through the borrowed executor.

use crate::errors::EntityError;
use crate::executor::DatabaseExecutor;
use crate::materializer;
use crate::metadata::{descriptor_for, Entity, EntityDescriptor};
use crate::query_builder::{Predicate, QueryBuilder, Statement};
use crate::schema::{SchemaSynchronizer, SyncReport};
use crate::{debug_log, trace_log};
use std::marker::PhantomData;
use std::sync::Arc;
use type_mapping::SqlValue;

pub struct EntityContext<'c, T, E>
where
    T: Entity,
    E: DatabaseExecutor + ?Sized,
{
    executor: &'c mut E,
    descriptor: Arc<EntityDescriptor>,
    sync_report: SyncReport,
    _entity: PhantomData<fn() -> T>,
}

impl<'c, T, E> EntityContext<'c, T, E>
where
    T: Entity,
    E: DatabaseExecutor + ?Sized,
{
    /// Resolve `T`'s descriptor and bring its table up to date.
    ///
    /// Fails with `EntityError::Configuration` for an invalid mapping and
    /// with `EntityError::Database` when a catalog or DDL statement fails.
    pub async fn new(executor: &'c mut E) -> Result<Self, EntityError> {
        let descriptor = descriptor_for::<T>()?;
        let sync_report = SchemaSynchronizer::new(&descriptor)
            .synchronize(&mut *executor)
            .await?;

        debug_log!(
            "Context ready for {} on table {} ({:?})",
            descriptor.type_name(),
            descriptor.table_name(),
            sync_report.action
        );

        Ok(Self {
            executor,
            descriptor,
            sync_report,
            _entity: PhantomData,
        })
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn sync_report(&self) -> &SyncReport {
        &self.sync_report
    }

    pub fn executor(&self) -> &E {
        &*self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut *self.executor
    }

    /// Insert or update `entity` depending on its primary key.
    ///
    /// A key `<= 0` inserts every mapped column and writes the generated id
    /// back into the entity. A positive key updates every mapped column of
    /// that row. Returns whether the statement affected a row.
    pub async fn persist(&mut self, entity: &mut T) -> Result<bool, EntityError> {
        let primary_key = self.primary_key_of(entity);
        let values = self.column_values(entity);

        if primary_key <= 0 {
            let statement = QueryBuilder::new(&self.descriptor).insert(values);
            let outcome = self.execute(&statement, "insert").await?;

            if let Some(id) = outcome.last_insert_id {
                let pk = self.descriptor.primary_key();
                let id = i64::try_from(id).map_err(|_| {
                    EntityError::conversion(
                        self.descriptor.table_name(),
                        &pk.name,
                        type_mapping::ConversionError::InvalidText {
                            value: id.to_string(),
                            target: "i64",
                        },
                    )
                })?;
                entity
                    .write_field(pk.field.name(), SqlValue::Integer(id))
                    .map_err(|e| EntityError::conversion(self.descriptor.table_name(), &pk.name, e))?;
            }

            return Ok(outcome.rows_affected > 0);
        }

        let Some(statement) = QueryBuilder::new(&self.descriptor).update(values, primary_key) else {
            debug_log!(
                "{} maps no columns besides its key; nothing to update",
                self.descriptor.type_name()
            );
            return Ok(false);
        };

        let outcome = self.execute(&statement, "update").await?;
        Ok(outcome.rows_affected > 0)
    }

    /// Every row of the table
    pub async fn find(&mut self) -> Result<Vec<T>, EntityError> {
        let statement = QueryBuilder::new(&self.descriptor).select(None);
        self.fetch(&statement).await
    }

    /// Every row matching `predicate`, in the order the database returns them
    pub async fn find_where(
        &mut self,
        predicate: impl Into<Predicate>,
    ) -> Result<Vec<T>, EntityError> {
        let predicate = predicate.into();
        let statement = QueryBuilder::new(&self.descriptor).select(Some(&predicate));
        self.fetch(&statement).await
    }

    pub async fn find_first(&mut self) -> Result<T, EntityError> {
        let statement = QueryBuilder::new(&self.descriptor).select_first(None);
        self.fetch_one(&statement, None).await
    }

    pub async fn find_first_where(
        &mut self,
        predicate: impl Into<Predicate>,
    ) -> Result<T, EntityError> {
        let predicate = predicate.into();
        let statement = QueryBuilder::new(&self.descriptor).select_first(Some(&predicate));
        self.fetch_one(&statement, Some(predicate.text())).await
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<T, EntityError> {
        let builder = QueryBuilder::new(&self.descriptor);
        let predicate = builder.primary_key_equals(id);
        let statement = builder.select_first(Some(&predicate));
        let shown = format!("{} = {}", self.descriptor.primary_key().name, id);
        self.fetch_one(&statement, Some(&shown)).await
    }

    /// Delete the rows matching `predicate` and return how many were removed.
    ///
    /// A blank predicate is rejected; there is no delete-all.
    pub async fn delete(&mut self, predicate: impl Into<Predicate>) -> Result<u64, EntityError> {
        let predicate = predicate.into();
        if predicate.is_blank() {
            return Err(EntityError::InvalidPredicate(format!(
                "refusing to delete from {} without a condition",
                self.descriptor.table_name()
            )));
        }

        let statement = QueryBuilder::new(&self.descriptor).delete(&predicate);
        let outcome = self.execute(&statement, "delete").await?;
        Ok(outcome.rows_affected)
    }

    fn primary_key_of(&self, entity: &T) -> i64 {
        match entity.read_field(self.descriptor.primary_key().field.name()) {
            Some(SqlValue::Integer(id)) => id,
            _ => 0,
        }
    }

    fn column_values<'d>(&'d self, entity: &T) -> Vec<(&'d str, SqlValue)> {
        self.descriptor
            .columns()
            .iter()
            .map(|column| {
                let value = entity
                    .read_field(column.field.name())
                    .unwrap_or(SqlValue::Null);
                (column.name.as_str(), value)
            })
            .collect()
    }

    async fn execute(
        &mut self,
        statement: &Statement,
        operation: &'static str,
    ) -> Result<crate::executor::ExecOutcome, EntityError> {
        trace_log!("{}: {}", operation, statement);
        self.executor
            .execute(statement)
            .await
            .map_err(|e| EntityError::database_operation(self.descriptor.table_name(), operation, e))
    }

    async fn fetch(&mut self, statement: &Statement) -> Result<Vec<T>, EntityError> {
        trace_log!("select: {}", statement);
        let rows = self
            .executor
            .fetch_all(statement)
            .await
            .map_err(|e| EntityError::database_operation(self.descriptor.table_name(), "select", e))?;
        materializer::materialize_all(&self.descriptor, rows)
    }

    async fn fetch_one(
        &mut self,
        statement: &Statement,
        predicate: Option<&str>,
    ) -> Result<T, EntityError> {
        self.fetch(statement)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EntityError::not_found(self.descriptor.table_name(), predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::MockExecutor;
    use crate::executor::ResultRow;
    use crate::schema::SyncAction;
    use crate::test_support::Employee;

    fn employee_row(id: i64, first: &str, last: &str, age: i64) -> ResultRow {
        ResultRow::new()
            .with("id", id)
            .with("first_name", first)
            .with("last_name", last)
            .with("age", age)
    }

    fn ready_executor() -> MockExecutor {
        MockExecutor::new().with_existing_table("employees", &["id", "first_name", "last_name", "age"])
    }

    #[tokio::test]
    async fn test_new_synchronizes_before_returning() {
        let mut executor = MockExecutor::new().with_missing_table();
        let context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();

        assert_eq!(context.sync_report().action, SyncAction::Created);
        assert_eq!(context.descriptor().table_name(), "employees");
        assert!(context.executor().sql_log()[1].starts_with("CREATE TABLE employees"));
    }

    #[tokio::test]
    async fn test_persist_new_entity_inserts_and_writes_back_id() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_outcome(1, Some(42));

        let mut employee = Employee::new("Ann", "Lee", 31);
        assert!(context.persist(&mut employee).await.unwrap());
        assert_eq!(employee.id, 42);

        let statement = context.executor().last_statement().unwrap();
        assert_eq!(
            statement.sql(),
            "INSERT INTO employees (first_name, last_name, age) VALUES (?, ?, ?)"
        );
        assert_eq!(
            statement.params(),
            &[
                SqlValue::from("Ann"),
                SqlValue::from("Lee"),
                SqlValue::Integer(31)
            ]
        );
    }

    #[tokio::test]
    async fn test_persist_existing_entity_updates() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_outcome(1, None);

        let mut employee = Employee {
            id: 7,
            ..Employee::new("Ann", "Lee", 32)
        };
        assert!(context.persist(&mut employee).await.unwrap());
        assert_eq!(employee.id, 7);

        let statement = context.executor().last_statement().unwrap();
        assert_eq!(
            statement.sql(),
            "UPDATE employees SET first_name = ?, last_name = ?, age = ? WHERE id = ?"
        );
        assert_eq!(statement.params().last(), Some(&SqlValue::Integer(7)));
    }

    #[tokio::test]
    async fn test_persist_update_of_missing_row_returns_false() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_outcome(0, None);

        let mut employee = Employee {
            id: 99,
            ..Employee::default()
        };
        assert!(!context.persist(&mut employee).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_where_returns_rows_in_order() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_rows(vec![
            employee_row(2, "Peter", "Pan", 12),
            employee_row(5, "Paula", "Abdul", 40),
        ]);

        let found = context.find_where("first_name LIKE 'P%'").await.unwrap();

        let names: Vec<&str> = found.iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, ["Peter", "Paula"]);
        assert_eq!(
            context.executor().last_statement().unwrap().sql(),
            "SELECT * FROM employees WHERE first_name LIKE 'P%'"
        );
    }

    #[tokio::test]
    async fn test_find_returns_every_row() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context
            .executor_mut()
            .push_rows(vec![employee_row(1, "Ann", "Lee", 31)]);

        let all = context.find().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(
            context.executor().last_statement().unwrap().sql(),
            "SELECT * FROM employees"
        );
    }

    #[tokio::test]
    async fn test_find_by_id_binds_key() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context
            .executor_mut()
            .push_rows(vec![employee_row(3, "Ann", "Lee", 31)]);

        let employee = context.find_by_id(3).await.unwrap();
        assert_eq!(employee.last_name, "Lee");

        let statement = context.executor().last_statement().unwrap();
        assert_eq!(statement.sql(), "SELECT * FROM employees WHERE id = ? LIMIT 1");
        assert_eq!(statement.params(), &[SqlValue::Integer(3)]);
    }

    #[tokio::test]
    async fn test_find_by_missing_id_is_not_found() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();

        let err = context.find_by_id(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("id = 404"));
    }

    #[tokio::test]
    async fn test_find_first_where_without_rows_is_not_found() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();

        let err = context.find_first_where("age > 200").await.unwrap_err();
        assert!(matches!(
            err,
            EntityError::NotFound { predicate: Some(ref p), .. } if p == "age > 200"
        ));
    }

    #[tokio::test]
    async fn test_find_first_takes_single_row() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context
            .executor_mut()
            .push_rows(vec![employee_row(1, "Ann", "Lee", 31)]);

        let first = context.find_first().await.unwrap();
        assert_eq!(first.id, 1);
        assert!(context
            .executor()
            .last_statement()
            .unwrap()
            .sql()
            .ends_with("LIMIT 1"));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_count() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_outcome(2, None);

        let removed = context.delete("last_name = 'Lee'").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(
            context.executor().last_statement().unwrap().sql(),
            "DELETE FROM employees WHERE last_name = 'Lee'"
        );
    }

    #[tokio::test]
    async fn test_delete_rejects_blank_predicate() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        let before = context.executor().statements().len();

        let err = context.delete("  ").await.unwrap_err();
        assert!(matches!(err, EntityError::InvalidPredicate(_)));
        assert_eq!(context.executor().statements().len(), before);
    }

    #[tokio::test]
    async fn test_statement_failure_is_database_error() {
        let mut executor = ready_executor();
        let mut context = EntityContext::<Employee, _>::new(&mut executor).await.unwrap();
        context.executor_mut().push_error("Table 'employees' doesn't exist");

        let err = context.find().await.unwrap_err();
        assert!(matches!(
            err,
            EntityError::Database {
                operation: "select",
                ..
            }
        ));
    }
}
