//! Document generators that turn a prompt into requirements, design and an
//! initial task list.
//!
//! Generators are pure: the same prompt always yields the same text. Only
//! the shape of the output is relied upon elsewhere in the crate.

use crate::task::Task;

/// Source of the three generated documents of a specification.
pub trait TemplateSource: Send + Sync {
    /// Markdown requirements with a user story and EARS acceptance criteria.
    fn requirements(&self, prompt: &str) -> String;

    /// Markdown design document.
    fn design(&self, prompt: &str) -> String;

    /// Initial implementation plan. Ids start at 1 and every task is pending.
    fn tasks(&self, prompt: &str) -> Vec<Task>;
}

/// Fixed-wording templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplates;

const EARS_CLAUSES: [(&str, &str); 4] = [
    (
        "a user initiates the feature",
        "respond with appropriate feedback",
    ),
    (
        "the feature is activated",
        "validate all inputs before processing",
    ),
    (
        "an error occurs",
        "display a clear error message to the user",
    ),
    (
        "the operation completes successfully",
        "update the UI to reflect the changes",
    ),
];

const DEFAULT_TASKS: [(&str, &str); 7] = [
    (
        "Set up project structure",
        "Initialize repository and configure build tools",
    ),
    (
        "Implement data models",
        "Create TypeScript interfaces and database schemas",
    ),
    (
        "Build API endpoints",
        "Develop RESTful API with validation",
    ),
    (
        "Create UI components",
        "Build React components with proper state management",
    ),
    ("Write unit tests", "Achieve 80%+ code coverage"),
    ("Integration testing", "Test end-to-end workflows"),
    ("Documentation", "Write API docs and user guides"),
];

const DESIGN_DOCUMENT: &str = r#"# Design Document

## Architecture Overview

This feature will be implemented using a modular architecture with clear separation of concerns.

## Components

### Frontend Components
- **UI Layer**: React components with TypeScript
- **State Management**: Context API / Redux
- **API Client**: Axios for HTTP requests

### Backend Services
- **API Endpoints**: RESTful API design
- **Business Logic**: Service layer
- **Data Access**: Repository pattern

## Data Flow

```
User Input → Validation → API Request → Business Logic → Database → Response → UI Update
```

## Data Models

### Primary Entity
```typescript
interface Feature {
  id: string;
  name: string;
  status: 'pending' | 'in-progress' | 'completed';
  createdAt: Date;
  updatedAt: Date;
}
```

## API Specifications

### Endpoints

**POST /api/features**
- Creates a new feature
- Request body: `{ name: string, description: string }`
- Response: `{ id: string, ...Feature }`

**GET /api/features/:id**
- Retrieves feature details
- Response: `Feature`

## Error Handling

- Input validation errors: 400 Bad Request
- Authentication errors: 401 Unauthorized
- Resource not found: 404 Not Found
- Server errors: 500 Internal Server Error

## Security Considerations

- Input sanitization
- Authentication and authorization
- Rate limiting
- CORS configuration

## Performance Requirements

- API response time: < 200ms
- Database query optimization
- Caching strategy for frequently accessed data"#;

impl TemplateSource for DefaultTemplates {
    fn requirements(&self, prompt: &str) -> String {
        let criteria: Vec<String> = EARS_CLAUSES
            .iter()
            .map(|(when, shall)| format!("**WHEN** {when}  \n**THE SYSTEM SHALL** {shall}"))
            .collect();

        format!(
            "# Requirements\n\
             \n\
             ## User Stories\n\
             \n\
             ### Story 1: {prompt}\n\
             \n\
             **As a** developer  \n\
             **I want** to implement {prompt}  \n\
             **So that** users can benefit from this feature\n\
             \n\
             ## Acceptance Criteria (EARS Notation)\n\
             \n\
             {}",
            criteria.join("\n\n")
        )
    }

    fn design(&self, _prompt: &str) -> String {
        DESIGN_DOCUMENT.to_string()
    }

    fn tasks(&self, _prompt: &str) -> Vec<Task> {
        DEFAULT_TASKS
            .iter()
            .zip(1u32..)
            .map(|((title, description), id)| Task::new(id, *title, *description))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
