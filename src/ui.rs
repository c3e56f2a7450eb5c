use crate::goals::{goal_description, status_note, DailyGoalStatus};
use crate::models::WeeklySummary;
use crate::timers::ALARM_TONES;

pub fn render_index(date: &str, status: &DailyGoalStatus, weekly: &WeeklySummary) -> String {
    let alarm = serde_json::to_string(&ALARM_TONES).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{EXERCISES_PERCENT}}", &status.exercises_percent.to_string())
        .replace("{{NUTRITION_PERCENT}}", &status.nutrition_percent.to_string())
        .replace("{{SPORT_PERCENT}}", &status.sport_percent.to_string())
        .replace("{{OVERALL_PERCENT}}", &status.overall_percent.to_string())
        .replace("{{NOTE}}", &status_note(status))
        .replace("{{GOAL_DESCRIPTION}}", &goal_description())
        .replace("{{WEEK}}", &weekly.week)
        .replace("{{ACTIVE_DAYS}}", &weekly.active_days.to_string())
        .replace("{{RUNNING_KM}}", &format_km(weekly.running_km))
        .replace("{{STRENGTH_SETS}}", &weekly.strength_sets.to_string())
        .replace("{{ALARM_TONES}}", &alarm)
}

fn format_km(km: f64) -> String {
    let rounded = (km * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Health Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #3c9a5f;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2 { margin: 0; }
    .subtitle, .note { color: #6b6860; margin: 4px 0 0; }
    .stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
    .stat { background: #fff; border-radius: 16px; padding: 14px; display: grid; gap: 4px; }
    .stat .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.06em; }
    .stat .value { font-size: 1.6rem; font-weight: 600; }
    .progress { height: 10px; background: #eee3d0; border-radius: 999px; overflow: hidden; }
    .progress > div { height: 100%; background: var(--accent); }
    .tabs { display: flex; gap: 8px; flex-wrap: wrap; }
    .tab { border: 0; border-radius: 999px; padding: 8px 16px; background: #fff; cursor: pointer; }
    .tab.active { background: var(--accent-2); color: #fff; }
    .screen { display: none; gap: 12px; }
    .screen.active { display: grid; }
    .row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
    .item { background: #fff; border-radius: 14px; padding: 10px 14px; display: flex; gap: 10px; align-items: center; }
    .item.done { outline: 2px solid var(--ok); }
    .item span { color: #6b6860; font-size: 0.85rem; display: block; }
    .pyramid { display: flex; flex-direction: column-reverse; gap: 6px; align-items: center; }
    .cube { width: 34px; height: 34px; border-radius: 8px; background: #eee3d0; cursor: pointer; display: inline-block; margin: 0 3px; }
    .cube.active { background: var(--accent); }
    .rings { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; }
    .ring { background: #fff; border-radius: 14px; padding: 8px; text-align: center; font-size: 0.8rem; }
    .ring.reached { outline: 2px solid var(--ok); }
    .status { min-height: 1.2em; }
    .status[data-type="error"] { color: #b03a2e; }
    button.danger { color: #b03a2e; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Daily Health Tracker</h1>
      <p class="subtitle">Today: <span id="date">{{DATE}}</span></p>
    </header>

    <section class="stats">
      <div class="stat"><span class="label">Exercises</span><span class="value" id="ex-pct">{{EXERCISES_PERCENT}} %</span></div>
      <div class="stat"><span class="label">Nutrition</span><span class="value" id="nu-pct">{{NUTRITION_PERCENT}} %</span></div>
      <div class="stat"><span class="label">Sport</span><span class="value" id="sp-pct">{{SPORT_PERCENT}} %</span></div>
      <div class="stat"><span class="label">Overall</span><span class="value" id="ov-pct">{{OVERALL_PERCENT}} %</span></div>
    </section>
    <div class="progress"><div id="progress" style="width: {{OVERALL_PERCENT}}%"></div></div>
    <p class="note" id="goal-note">{{NOTE}}</p>
    <p class="note">{{GOAL_DESCRIPTION}}</p>

    <section>
      <h2>Last 7 days</h2>
      <div class="rings" id="goal-history"></div>
    </section>

    <section class="stats">
      <div class="stat"><span class="label">Week</span><span class="value" id="week">{{WEEK}}</span></div>
      <div class="stat"><span class="label">Active days</span><span class="value" id="week-active">{{ACTIVE_DAYS}} / 7</span></div>
      <div class="stat"><span class="label">Running</span><span class="value" id="week-km">{{RUNNING_KM}} km</span></div>
      <div class="stat"><span class="label">Strength sets</span><span class="value" id="week-sets">{{STRENGTH_SETS}}</span></div>
    </section>

    <nav class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="exercises">Exercises</button>
      <button class="tab" type="button" data-tab="nutrition">Nutrition</button>
      <button class="tab" type="button" data-tab="sport">Sport</button>
      <button class="tab" type="button" data-tab="data">Data</button>
    </nav>

    <section class="screen active" id="tab-exercises">
      <div class="row">
        <input type="date" id="exercises-date" />
        <button type="button" class="today-btn" data-target="exercises-date">Today</button>
        <button type="button" class="danger" id="exercises-reset">Reset day</button>
      </div>
      <div id="exercise-list"></div>
      <div class="row">
        <div class="item"><strong>Heat pad</strong> <span id="timer-heat">10:00</span>
          <button type="button" data-timer="heat" data-action="toggle">Start</button>
          <button type="button" data-timer="heat" data-action="reset">Reset</button></div>
        <div class="item"><strong>Ice bath</strong> <span id="timer-ice">1:10</span>
          <button type="button" data-timer="ice" data-action="toggle">Start</button>
          <button type="button" data-timer="ice" data-action="reset">Reset</button></div>
      </div>
      <h2>History</h2>
      <div id="exercise-history"></div>
    </section>

    <section class="screen" id="tab-nutrition">
      <div class="row">
        <input type="date" id="nutrition-date" />
        <button type="button" class="today-btn" data-target="nutrition-date">Today</button>
      </div>
      <div class="pyramid" id="pyramid"></div>
    </section>

    <section class="screen" id="tab-sport">
      <div class="row">
        <input type="date" id="sport-date" />
        <button type="button" class="today-btn" data-target="sport-date">Today</button>
      </div>
      <div class="row">
        <input id="running-km" placeholder="km, e.g. 5,5" />
        <button type="button" id="running-save">Save running</button>
        <button type="button" class="danger" id="running-delete">Delete</button>
        <span id="running-current" class="note"></span>
      </div>
      <div class="row">
        <input id="strength-exercise" placeholder="Exercise" />
        <input id="strength-weight" placeholder="kg (optional)" />
        <input id="strength-reps" type="number" min="1" placeholder="Reps" />
        <input id="strength-sets" type="number" min="1" placeholder="Sets" />
        <button type="button" id="strength-add">Add</button>
      </div>
      <div id="strength-list"></div>
    </section>

    <section class="screen" id="tab-data">
      <div class="row">
        <a href="/api/export" download>Export JSON</a>
        <input type="file" id="import-file" accept="application/json" />
        <button type="button" id="import-btn">Import</button>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const ALARM_TONES = {{ALARM_TONES}};
    const statusEl = document.getElementById('status');
    const $ = (id) => document.getElementById(id);

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (method, path, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = typeof body === 'string' ? body : JSON.stringify(body);
      }
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const note = (text) => el('p', 'note', text);

    const dateOf = (inputId) => $(inputId).value || 'today';
    const formatKm = (km) => String(km).replace('.', ',');

    const refreshDashboard = async () => {
      const [dashboard, weekly, history] = await Promise.all([
        api('GET', '/api/dashboard'),
        api('GET', '/api/weekly'),
        api('GET', '/api/history/goals')
      ]);
      const s = dashboard.status;
      $('ex-pct').textContent = `${s.exercises_percent} %`;
      $('nu-pct').textContent = `${s.nutrition_percent} %`;
      $('sp-pct').textContent = `${s.sport_percent} %`;
      $('ov-pct').textContent = `${s.overall_percent} %`;
      $('progress').style.width = `${s.overall_percent}%`;
      $('goal-note').textContent = dashboard.note;
      $('week').textContent = weekly.week;
      $('week-active').textContent = `${weekly.active_days} / 7`;
      $('week-km').textContent = `${formatKm(Math.round(weekly.running_km * 10) / 10)} km`;
      $('week-sets').textContent = weekly.strength_sets;
      $('goal-history').replaceChildren(...history.map((day) => {
        const ring = el('div', `ring ${day.goal_reached ? 'reached' : ''}`);
        ring.append(
          el('strong', '', day.date.slice(5)),
          el('br'),
          `E ${day.exercises_percent}% · N ${day.nutrition_percent}% · S ${day.sport_percent}%`
        );
        return ring;
      }));
    };

    const renderExercises = async () => {
      const day = await api('GET', `/api/exercises/${dateOf('exercises-date')}`);
      $('exercises-date').value = day.date;
      const list = $('exercise-list');
      list.replaceChildren();
      day.items.forEach((item) => {
        const row = el('label', `item ${item.done ? 'done' : ''}`);
        const checkbox = el('input');
        checkbox.type = 'checkbox';
        checkbox.checked = item.done;
        const text = el('div', '', item.title);
        text.appendChild(el('span', '', item.detail));
        row.append(checkbox, text);
        checkbox.addEventListener('change', (event) => {
          api('PUT', `/api/exercises/${day.date}/${item.id}`, { done: event.target.checked })
            .then(() => Promise.all([renderExercises(), refreshDashboard()]))
            .catch((err) => setStatus(err.message, 'error'));
        });
        list.appendChild(row);
      });
      const history = await api('GET', '/api/history/exercises');
      $('exercise-history').replaceChildren(...(history.length
        ? history.map((h) => el('div', 'item', `${h.date}: ${h.done_count} of ${h.total}`))
        : [note('No completed exercises yet.')]));
    };

    const renderNutrition = async () => {
      const day = await api('GET', `/api/nutrition/${dateOf('nutrition-date')}`);
      $('nutrition-date').value = day.date;
      const pyramid = $('pyramid');
      pyramid.replaceChildren();
      day.levels.forEach((level) => {
        const row = document.createElement('div');
        row.title = `${level.label}: ${level.count} / ${level.max_units} (need ${level.required_units})`;
        for (let i = 0; i < level.max_units; i += 1) {
          const cube = document.createElement('span');
          cube.className = `cube ${i < level.count ? 'active' : ''}`;
          cube.addEventListener('click', () => {
            api('POST', `/api/nutrition/${day.date}/${level.id}`, { cube: i })
              .then(() => Promise.all([renderNutrition(), refreshDashboard()]))
              .catch((err) => setStatus(err.message, 'error'));
          });
          row.appendChild(cube);
        }
        pyramid.appendChild(row);
      });
    };

    const renderSport = async () => {
      const day = await api('GET', `/api/sport/${dateOf('sport-date')}`);
      $('sport-date').value = day.date;
      $('running-km').value = day.running_km != null ? formatKm(day.running_km) : '';
      $('running-current').textContent = day.running_km > 0
        ? `Saved: ${formatKm(day.running_km)} km`
        : 'No running entry saved.';
      const list = $('strength-list');
      list.replaceChildren(...(day.strength.length ? [] : [note('No strength entries for this date yet.')]));
      day.strength.forEach((entry, index) => {
        const row = el('div', 'item');
        const weight = entry.weight == null ? 'body weight' : `${formatKm(entry.weight)} kg`;
        const title = el('div', '', entry.exercise);
        title.appendChild(el('span', '', `${weight} · ${entry.sets}×${entry.reps} reps`));
        row.appendChild(title);
        const del = el('button', 'danger', 'Delete');
        del.addEventListener('click', () => {
          if (!window.confirm('Really delete this strength entry?')) return;
          api('DELETE', `/api/sport/${day.date}/strength/${index}?confirm=true`)
            .then(() => Promise.all([renderSport(), refreshDashboard()]))
            .catch((err) => setStatus(err.message, 'error'));
        });
        row.appendChild(del);
        list.appendChild(row);
      });
    };

    const refreshAll = () => Promise.all([refreshDashboard(), renderExercises(), renderNutrition(), renderSport()]);

    document.querySelectorAll('.tab').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.tab').forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('.screen').forEach((screen) => {
          screen.classList.toggle('active', screen.id === `tab-${button.dataset.tab}`);
        });
      });
    });

    document.querySelectorAll('.today-btn').forEach((button) => {
      button.addEventListener('click', () => {
        $(button.dataset.target).value = $('date').textContent;
        refreshAll().catch((err) => setStatus(err.message, 'error'));
      });
    });

    ['exercises-date', 'nutrition-date', 'sport-date'].forEach((id) => {
      $(id).addEventListener('change', () => refreshAll().catch((err) => setStatus(err.message, 'error')));
    });

    $('exercises-reset').addEventListener('click', () => {
      if (!window.confirm('Really reset the exercises for this date?')) return;
      api('POST', `/api/exercises/${dateOf('exercises-date')}/reset?confirm=true`)
        .then(() => Promise.all([renderExercises(), refreshDashboard()]))
        .catch((err) => setStatus(err.message, 'error'));
    });

    $('running-save').addEventListener('click', () => {
      api('PUT', `/api/sport/${dateOf('sport-date')}/running`, { distance: $('running-km').value })
        .then(() => Promise.all([renderSport(), refreshDashboard()]))
        .then(() => setStatus('Running saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    $('running-delete').addEventListener('click', () => {
      if (!window.confirm('Really delete the running entry for this date?')) return;
      api('DELETE', `/api/sport/${dateOf('sport-date')}/running?confirm=true`)
        .then(() => Promise.all([renderSport(), refreshDashboard()]))
        .catch((err) => setStatus(err.message, 'error'));
    });

    $('strength-add').addEventListener('click', () => {
      const payload = {
        exercise: $('strength-exercise').value,
        weight: $('strength-weight').value,
        reps: parseInt($('strength-reps').value || '0', 10),
        sets: parseInt($('strength-sets').value || '0', 10)
      };
      api('POST', `/api/sport/${dateOf('sport-date')}/strength`, payload)
        .then(() => {
          ['strength-exercise', 'strength-weight', 'strength-reps', 'strength-sets'].forEach((id) => { $(id).value = ''; });
          return Promise.all([renderSport(), refreshDashboard()]);
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    $('import-btn').addEventListener('click', async () => {
      const file = $('import-file').files[0];
      if (!file) {
        setStatus('Please choose a JSON file first.', 'error');
        return;
      }
      try {
        const result = await api('POST', '/api/import', await file.text());
        await refreshAll();
        setStatus(`Import finished: ${result.imported_days} days, previous data overwritten.`, 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const playAlarm = () => {
      const AudioContextClass = window.AudioContext || window.webkitAudioContext;
      if (!AudioContextClass) return;
      const ctx = new AudioContextClass();
      const master = ctx.createGain();
      master.gain.value = 0.18;
      master.connect(ctx.destination);
      const now = ctx.currentTime;
      ALARM_TONES.forEach((tone) => {
        const start = now + tone.offset_ms / 1000;
        const end = start + tone.duration_ms / 1000;
        const osc = ctx.createOscillator();
        const gain = ctx.createGain();
        osc.type = 'sine';
        osc.frequency.value = tone.frequency_hz;
        gain.gain.setValueAtTime(0, start);
        gain.gain.linearRampToValueAtTime(0.12, start + 0.03);
        gain.gain.linearRampToValueAtTime(0, end);
        osc.connect(gain);
        gain.connect(master);
        osc.start(start);
        osc.stop(end);
      });
      window.setTimeout(() => ctx.close(), 2600);
    };

    const renderTimers = (data) => {
      data.timers.forEach((timer) => {
        $(`timer-${timer.id}`).textContent = timer.display;
        const button = document.querySelector(`[data-timer="${timer.id}"][data-action="toggle"]`);
        button.textContent = timer.phase === 'running' ? 'Pause' : 'Start';
        if (timer.alarm) playAlarm();
      });
    };

    document.querySelectorAll('[data-timer]').forEach((button) => {
      button.addEventListener('click', () => {
        api('POST', `/api/timers/${button.dataset.timer}/${button.dataset.action}`)
          .then(renderTimers)
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    window.setInterval(() => {
      api('GET', '/api/timers').then(renderTimers).catch(() => {});
    }, 1000);

    refreshAll().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
